//! CLI runs over the bundled scenario files and presets.

mod common;

use std::fs;

use common::{parse_metric, run_cli, run_cli_ok};

#[test]
fn scenario_files_produce_distinct_risk() {
    let baseline = run_cli_ok(&["--scenario", "scenarios/baseline.toml"]);
    let extreme = run_cli_ok(&["--scenario", "scenarios/fresno_extreme.toml"]);
    let islanded = run_cli_ok(&["--scenario", "scenarios/islanded_storm.toml"]);

    assert!(baseline.contains("Los Angeles @ 14:00"));
    assert!(baseline.contains("Temperature 36°C"));
    assert!(extreme.contains("Fresno @ 14:00"));
    assert!(extreme.contains("Temperature 65°C"));
    assert!(islanded.contains("islanded"));

    let base_risk = parse_metric(&baseline, "Heat risk:", "%");
    let extreme_risk = parse_metric(&extreme, "Heat risk:", "%");
    assert!(
        extreme_risk > base_risk,
        "expected extreme heat risk above baseline: baseline={base_risk}, extreme={extreme_risk}"
    );

    let base_uptime = parse_metric(&baseline, "System uptime:", "%");
    let extreme_uptime = parse_metric(&extreme, "System uptime:", "%");
    assert!(extreme_uptime < base_uptime);
}

#[test]
fn extreme_scenario_prints_extreme_plan_and_critical_actions() {
    let out = run_cli_ok(&["--scenario", "scenarios/fresno_extreme.toml"]);
    assert!(out.contains("Active response plan: extreme"));
    assert!(out.contains("--- Recommended Actions ---"));
    assert!(out.contains("[critical]"));
    assert!(out.contains("critical=2"));
}

#[test]
fn presets_run_with_pinned_hour() {
    for preset in ["baseline", "moderate_heatwave", "extreme_heatwave", "islanded"] {
        let out = run_cli_ok(&["--preset", preset, "--hour", "3"]);
        assert!(out.contains("@ 03:00"), "{preset}: {out}");
        assert!(out.contains("--- Derived Metrics ---"), "{preset}");
    }
}

#[test]
fn calm_night_has_no_active_plan() {
    let out = run_cli_ok(&["--preset", "baseline", "--hour", "3"]);
    assert!(out.contains("Temperature 26°C"));
    assert!(out.contains("Active response plan: none"));
}

#[test]
fn location_override_applies_before_report() {
    let out = run_cli_ok(&["--preset", "baseline", "--location", "fresno", "--hour", "14"]);
    assert!(out.contains("Fresno @ 14:00"));
    assert!(out.contains("Temperature 43°C"));
}

#[test]
fn telemetry_out_writes_day_profile() {
    let path = std::env::temp_dir().join(format!("heatwave-sim-{}.csv", std::process::id()));
    let path_str = path.to_str().expect("temp path should be UTF-8");

    run_cli_ok(&["--preset", "extreme_heatwave", "--hour", "14", "--telemetry-out", path_str]);

    let csv = fs::read_to_string(&path).expect("csv should exist");
    let _ = fs::remove_file(&path);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 25);
    assert!(lines[0].starts_with("hour,temperature_c,uptime_pct"));
    assert!(lines[15].starts_with("14,65,"));
    assert!(lines[15].ends_with(",extreme"));
}

#[test]
fn unknown_preset_exits_with_error() {
    let output = run_cli(&["--preset", "volcano"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "{stderr}");
}

#[test]
fn invalid_scenario_exits_with_field_errors() {
    let path = std::env::temp_dir().join(format!("heatwave-bad-{}.toml", std::process::id()));
    fs::write(
        &path,
        "[simulation]\nrenewable_penetration = 140.0\ntick_interval_secs = 0\n",
    )
    .expect("temp scenario should be writable");

    let output = run_cli(&["--scenario", path.to_str().expect("UTF-8 path")]);
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation.renewable_penetration"), "{stderr}");
    assert!(stderr.contains("simulation.tick_interval_secs"), "{stderr}");
}

#[test]
fn unknown_fields_and_bad_flags_are_rejected() {
    let path = std::env::temp_dir().join(format!("heatwave-unk-{}.toml", std::process::id()));
    fs::write(&path, "[simulation]\nsolar_kw = 5.0\n").expect("temp scenario should be writable");
    let output = run_cli(&["--scenario", path.to_str().expect("UTF-8 path")]);
    let _ = fs::remove_file(&path);
    assert_eq!(output.status.code(), Some(1));

    assert_eq!(run_cli(&["--hour", "24"]).status.code(), Some(1));
    assert_eq!(run_cli(&["--location", "reno"]).status.code(), Some(1));
    assert_eq!(run_cli(&["--bogus"]).status.code(), Some(1));
}
