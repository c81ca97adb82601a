//! Heatwave simulator entry point: CLI wiring and scenario-driven session construction.

use std::path::Path;
use std::process;
#[cfg(any(feature = "api", feature = "tui"))]
use std::time::Duration;

use heatwave_sim::catalog::actions::{recommended_actions, summarize};
use heatwave_sim::catalog::plans::plan;
use heatwave_sim::config::ScenarioConfig;
use heatwave_sim::error::Error;
use heatwave_sim::io::export::{day_profile, export_csv};
use heatwave_sim::sim::clock::{FixedHour, HourSource, WallClock};
use heatwave_sim::sim::session::Session;
use heatwave_sim::sim::types::Location;
use heatwave_sim::telemetry::init_tracing;
use tracing::info;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    location: Option<Location>,
    hour: Option<u32>,
    seed_override: Option<u64>,
    telemetry_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("heatwave-sim - Climate-risk simulator for California data centers");
    eprintln!();
    eprintln!("Usage: heatwave-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --location <slug>        Override the site (san-francisco, los-angeles, sacramento, fresno)");
    eprintln!("  --hour <0-23>            Pin the hour of day instead of using the local clock");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --telemetry-out <path>   Export the 24-hour profile to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the report");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the live terminal dashboard");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

/// Returns the value following a flag or exits with a usage error.
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str, kind: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("error: {flag} requires a {kind} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        location: None,
        hour: None,
        seed_override: None,
        telemetry_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(flag_value(&args, i, "--scenario", "path").to_string());
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(flag_value(&args, i, "--preset", "name").to_string());
            }
            "--location" => {
                i += 1;
                match flag_value(&args, i, "--location", "slug").parse::<Location>() {
                    Ok(l) => cli.location = Some(l),
                    Err(e) => {
                        eprintln!("error: {e}");
                        process::exit(1);
                    }
                }
            }
            "--hour" => {
                i += 1;
                let raw = flag_value(&args, i, "--hour", "0-23");
                match raw.parse::<u32>() {
                    Ok(h) if h < 24 => cli.hour = Some(h),
                    _ => {
                        eprintln!("error: --hour value \"{raw}\" is not an hour in 0-23");
                        process::exit(1);
                    }
                }
            }
            "--seed" => {
                i += 1;
                let raw = flag_value(&args, i, "--seed", "u64");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                cli.telemetry_out =
                    Some(flag_value(&args, i, "--telemetry-out", "path").to_string());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = flag_value(&args, i, "--port", "u16");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Loads the scenario: `--scenario` takes priority, then `--preset`, then baseline.
fn load_scenario(cli: &CliArgs) -> (ScenarioConfig, String) {
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path)).map(|cfg| (cfg, "scenario".to_string()))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map(|cfg| (cfg, name.clone()))
    } else {
        Ok((ScenarioConfig::baseline(), "baseline".to_string()))
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

/// Prints the snapshot report followed by the action list and active plan.
fn print_report(session: &Session) {
    let snapshot = session.snapshot();
    println!("{snapshot}");

    let actions = recommended_actions(session.state());
    let summary = summarize(&actions);
    println!("\n--- Recommended Actions ---");
    for a in &actions {
        println!(
            "[{:<8}] {} ({}, {}, -{}% risk)",
            a.priority.to_string(),
            a.title,
            a.cost_estimate,
            a.time_to_implement,
            a.risk_reduction
        );
    }
    println!(
        "critical={} high={} medium={} low={} total_cost=${} energy_savings={}% avg_risk_reduction={}%",
        summary.critical,
        summary.high,
        summary.medium,
        summary.low,
        summary.total_cost,
        summary.total_energy_savings,
        summary.avg_risk_reduction
    );

    if let Some(level) = snapshot.active_plan {
        let p = plan(level, session.state(), session.profile());
        println!("\n--- {} ---", p.name);
        for step in &p.steps {
            println!(
                "  {:<10} {} (trigger: {}, {}%)",
                step.status.to_string(),
                step.title,
                step.trigger_condition,
                step.success_probability
            );
        }
    }
}

/// Runs the interactive surfaces, if any were requested, driven by `clock`.
#[cfg_attr(not(feature = "tui"), allow(unused_variables))]
fn run_surfaces<C: HourSource>(
    cli: &CliArgs,
    scenario: &ScenarioConfig,
    preset_name: &str,
    session: Session,
    clock: C,
) {
    #[cfg(any(feature = "api", feature = "tui"))]
    let tick = Duration::from_secs(scenario.simulation.tick_interval_secs);

    #[cfg(feature = "tui")]
    if cli.tui {
        heatwave_sim::tui::run(session.shared(), preset_name, clock, tick);
        return;
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;

        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(heatwave_sim::api::serve(session.shared(), clock, tick, addr)) {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    init_tracing();
    let cli = parse_args();

    let (mut scenario, preset_name) = load_scenario(&cli);

    if let Some(location) = cli.location {
        scenario.simulation.location = location;
    }
    if let Some(hour) = cli.hour {
        scenario.simulation.hour = Some(hour);
    }
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        eprintln!("{}", Error::Invalid(errors));
        process::exit(1);
    }

    let pinned = scenario.simulation.hour;
    let hour = pinned.unwrap_or_else(|| WallClock.hour());
    let session = Session::from_scenario(&scenario, hour);
    info!(
        preset = %preset_name,
        location = %scenario.simulation.location,
        hour,
        "session ready"
    );

    #[cfg(feature = "tui")]
    let interactive = cli.tui;
    #[cfg(not(feature = "tui"))]
    let interactive = false;
    if !interactive {
        print_report(&session);
    }

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&day_profile(session.state()), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }

    match pinned {
        Some(h) => run_surfaces(&cli, &scenario, &preset_name, session, FixedHour::new(h)),
        None => run_surfaces(&cli, &scenario, &preset_name, session, WallClock),
    }
}
