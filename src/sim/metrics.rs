//! Derived risk metrics computed from the simulation state.

use std::fmt;

use serde::Serialize;

use crate::climate::LocationProfile;

use super::types::SimulationState;

/// Baseline uptime before heat and resilience adjustments (%).
const BASE_UPTIME: f64 = 99.5;
/// Uptime floor (%).
const MIN_UPTIME: f64 = 85.0;
/// Uptime ceiling (%).
const MAX_UPTIME: f64 = 99.9;
/// Baseline cooling load and energy demand (%).
const BASE_LOAD: f64 = 100.0;
/// Grid stability reported when no heatwave is active (%).
const CALM_GRID_STABILITY: f64 = 95.0;

/// Derived metrics for one evaluation of the state.
///
/// `cooling_load` and `energy_demand` are not capped and may exceed 100;
/// use [`Metrics::cooling_load_display`] for progress-bar style output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Normalized excess temperature, `max(0, (current - avg) / 20)`.
    pub heat_stress: f64,
    /// Estimated uptime (%), in `[85, 99.9]` for non-negative inputs.
    pub uptime: f64,
    /// Cooling load relative to baseline (%).
    pub cooling_load: f64,
    /// Grid stability (%).
    pub grid_stability: f64,
    /// Energy demand relative to baseline (%).
    pub energy_demand: f64,
    /// Heat risk (%), at most 100.
    pub heat_risk: f64,
}

/// Badge band for the heat-risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl RiskBand {
    /// `> 70` high, `> 40` elevated, otherwise low.
    pub fn from_pct(pct: f64) -> Self {
        if pct > 70.0 {
            RiskBand::High
        } else if pct > 40.0 {
            RiskBand::Elevated
        } else {
            RiskBand::Low
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => f.write_str("low"),
            RiskBand::Elevated => f.write_str("elevated"),
            RiskBand::High => f.write_str("high"),
        }
    }
}

/// Computes the derived metrics for `state` at the site described by `profile`.
///
/// Pure; no input is rejected. Out-of-range inputs flow through the same
/// arithmetic.
pub fn derive_metrics(state: &SimulationState, profile: &LocationProfile) -> Metrics {
    let temp_diff = f64::from(state.current_temp) - profile.avg_summer_temp;
    let heat_stress = (temp_diff / 20.0).max(0.0);

    let uptime = (BASE_UPTIME - heat_stress * 15.0
        + state.battery_capacity * 0.05
        + state.renewable_penetration * 0.02)
        .max(MIN_UPTIME)
        .min(MAX_UPTIME);

    let cooling_load = BASE_LOAD * (1.0 + heat_stress * 0.8);

    let grid_stability = if state.heatwave_active {
        (100.0 - heat_stress * 30.0).max(0.0)
    } else {
        CALM_GRID_STABILITY
    };

    let energy_demand = BASE_LOAD * (1.0 + heat_stress * 0.6);
    let heat_risk = (heat_stress * 100.0).min(100.0);

    Metrics {
        heat_stress,
        uptime,
        cooling_load,
        grid_stability,
        energy_demand,
        heat_risk,
    }
}

impl Metrics {
    /// Cooling load clamped to 100 for gauge display.
    pub fn cooling_load_display(&self) -> f64 {
        self.cooling_load.min(100.0)
    }

    /// Badge band for the heat risk.
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_pct(self.heat_risk)
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Derived Metrics ---")?;
        writeln!(f, "System uptime:         {:.1}%", self.uptime)?;
        writeln!(f, "Cooling load:          {:.0}%", self.cooling_load)?;
        writeln!(f, "Grid stability:        {:.0}%", self.grid_stability)?;
        writeln!(f, "Energy demand:         {:.0}%", self.energy_demand)?;
        write!(
            f,
            "Heat risk:             {:.0}% ({})",
            self.heat_risk,
            self.risk_band()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::Location;

    fn state_with(current_temp: i32, heatwave_active: bool) -> SimulationState {
        SimulationState {
            current_temp,
            heatwave_active,
            ..SimulationState::default()
        }
    }

    #[test]
    fn no_heat_stress_at_average_temperature() {
        let state = state_with(28, false);
        let m = derive_metrics(&state, Location::LosAngeles.profile());
        assert_eq!(m.heat_stress, 0.0);
        // 99.5 + 3.5 + 0.9 capped at 99.9
        assert_eq!(m.uptime, 99.9);
        assert_eq!(m.cooling_load, 100.0);
        assert_eq!(m.grid_stability, 95.0);
        assert_eq!(m.energy_demand, 100.0);
        assert_eq!(m.heat_risk, 0.0);
    }

    #[test]
    fn below_average_temperature_has_zero_stress() {
        let state = state_with(10, true);
        let m = derive_metrics(&state, Location::LosAngeles.profile());
        assert_eq!(m.heat_stress, 0.0);
        assert_eq!(m.grid_stability, 100.0);
    }

    #[test]
    fn extreme_afternoon_heatwave() {
        // LA 28 + 8 + 22 = 58, stress = 30 / 20 = 1.5
        let state = state_with(58, true);
        let m = derive_metrics(&state, Location::LosAngeles.profile());
        assert!((m.heat_stress - 1.5).abs() < 1e-12);
        // 99.5 - 22.5 + 3.5 + 0.9 = 81.4 -> floor 85
        assert_eq!(m.uptime, 85.0);
        assert!((m.cooling_load - 220.0).abs() < 1e-9);
        assert!((m.grid_stability - 55.0).abs() < 1e-9);
        assert!((m.energy_demand - 190.0).abs() < 1e-9);
        assert_eq!(m.heat_risk, 100.0);
        assert_eq!(m.cooling_load_display(), 100.0);
    }

    #[test]
    fn moderate_stress_values() {
        // LA at 38: stress 0.5
        let state = SimulationState {
            current_temp: 38,
            heatwave_active: true,
            battery_capacity: 0.0,
            renewable_penetration: 0.0,
            ..SimulationState::default()
        };
        let m = derive_metrics(&state, Location::LosAngeles.profile());
        assert!((m.uptime - 92.0).abs() < 1e-9);
        assert!((m.cooling_load - 140.0).abs() < 1e-9);
        assert!((m.grid_stability - 85.0).abs() < 1e-9);
        assert!((m.energy_demand - 130.0).abs() < 1e-9);
        assert!((m.heat_risk - 50.0).abs() < 1e-9);
        assert_eq!(m.risk_band(), RiskBand::Elevated);
    }

    #[test]
    fn uptime_stays_within_bounds() {
        for temp in -10..=80 {
            for battery in [0.0, 50.0, 100.0] {
                for renewable in [0.0, 50.0, 100.0] {
                    let state = SimulationState {
                        current_temp: temp,
                        battery_capacity: battery,
                        renewable_penetration: renewable,
                        ..SimulationState::default()
                    };
                    for loc in Location::ALL {
                        let m = derive_metrics(&state, loc.profile());
                        assert!(m.uptime >= 85.0 && m.uptime <= 99.9, "uptime {}", m.uptime);
                        assert!(m.heat_risk >= 0.0 && m.heat_risk <= 100.0);
                    }
                }
            }
        }
    }

    #[test]
    fn grid_stability_fixed_without_heatwave() {
        for temp in [0, 28, 45, 70] {
            let m = derive_metrics(&state_with(temp, false), Location::Fresno.profile());
            assert_eq!(m.grid_stability, 95.0);
        }
    }

    #[test]
    fn derivation_is_idempotent() {
        let state = state_with(44, true);
        let profile = Location::Sacramento.profile();
        assert_eq!(derive_metrics(&state, profile), derive_metrics(&state, profile));
    }

    #[test]
    fn risk_bands() {
        assert_eq!(RiskBand::from_pct(0.0), RiskBand::Low);
        assert_eq!(RiskBand::from_pct(40.0), RiskBand::Low);
        assert_eq!(RiskBand::from_pct(40.1), RiskBand::Elevated);
        assert_eq!(RiskBand::from_pct(70.0), RiskBand::Elevated);
        assert_eq!(RiskBand::from_pct(70.1), RiskBand::High);
    }

    #[test]
    fn display_does_not_panic() {
        let m = derive_metrics(&SimulationState::default(), Location::LosAngeles.profile());
        let s = format!("{m}");
        assert!(s.contains("Heat risk"));
    }
}
