//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::process::{Command, Output};

use heatwave_sim::config::ScenarioConfig;
use heatwave_sim::sim::session::Session;

/// Hour used by every fixture: mid-afternoon, peak of the diurnal curve.
pub const AFTERNOON: u32 = 14;

/// Session built from a named preset at [`AFTERNOON`].
pub fn preset_session(name: &str) -> Session {
    let cfg = ScenarioConfig::from_preset(name).expect("preset should exist");
    assert!(cfg.validate().is_empty(), "preset {name} should validate");
    Session::from_scenario(&cfg, AFTERNOON)
}

/// Runs the CLI binary with `args` and returns its output.
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heatwave-sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("heatwave-sim process should run")
}

/// Runs the CLI, asserts success, and returns stdout.
pub fn run_cli_ok(args: &[&str]) -> String {
    let output = run_cli(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

/// Value after `label` on the first line that starts with it, parsed up to `unit`.
pub fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));
    let number = raw
        .split_once(unit)
        .map_or(raw, |(left, _)| left)
        .trim();
    number
        .parse()
        .unwrap_or_else(|_| panic!("cannot parse `{number}` in line `{line}`"))
}
