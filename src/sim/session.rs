//! The explicit state container owned by the top-level surface.
//!
//! A [`Session`] holds the single mutable [`SimulationState`] and applies
//! discrete user inputs to it. Display surfaces only read snapshots.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::catalog::plans::{PlanLevel, active_plan};
use crate::climate::LocationProfile;
use crate::config::ScenarioConfig;

use super::metrics::{Metrics, RiskBand, derive_metrics};
use super::temperature::compute_current_temp;
use super::types::{
    ClimateEvent, HeatwaveIntensity, Location, OperationMode, SimulationState, clamp_pct,
};

/// Session shared between a surface and its ticker.
pub type SharedSession = Arc<RwLock<Session>>;

/// A discrete user interaction. Each maps onto exactly one state field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Input {
    SelectLocation(Location),
    SetHeatwaveActive(bool),
    SetHeatwaveIntensity(HeatwaveIntensity),
    SetOperationMode(OperationMode),
    SetRenewablePenetration(f64),
    SetBatteryCapacity(f64),
    SetBackupGenerators(bool),
    SetLoadShifting(bool),
    SetMonitoring(bool),
}

/// Mutable simulation session.
#[derive(Debug, Clone)]
pub struct Session {
    state: SimulationState,
    hour: u32,
    monitoring: bool,
    climate_event_override: Option<ClimateEvent>,
    seed: u64,
}

impl Session {
    /// Creates a session and derives the temperature for `hour`.
    pub fn new(state: SimulationState, hour: u32) -> Self {
        let mut session = Self {
            state,
            hour: hour % 24,
            monitoring: false,
            climate_event_override: None,
            seed: 42,
        };
        session.state.renewable_penetration = clamp_pct(session.state.renewable_penetration);
        session.state.battery_capacity = clamp_pct(session.state.battery_capacity);
        session.state.grid_stability = clamp_pct(session.state.grid_stability);
        session.recompute_temp();
        session
    }

    /// Builds a session from a validated scenario.
    pub fn from_scenario(cfg: &ScenarioConfig, hour: u32) -> Self {
        let mut session = Self::new(cfg.initial_state(), hour);
        session.climate_event_override = cfg.facility.climate_event;
        session.seed = cfg.simulation.seed;
        session
    }

    /// Wraps the session for sharing with a ticker or request handlers.
    pub fn shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    /// Applies one input. Returns `true` when the temperature was recomputed.
    pub fn apply(&mut self, input: Input) -> bool {
        debug!(?input, "applying input");
        let s = &mut self.state;
        match input {
            Input::SelectLocation(location) => {
                s.location = location;
                self.recompute_temp();
                true
            }
            Input::SetHeatwaveActive(active) => {
                s.heatwave_active = active;
                self.recompute_temp();
                true
            }
            Input::SetHeatwaveIntensity(intensity) => {
                s.heatwave_intensity = intensity;
                self.recompute_temp();
                true
            }
            Input::SetOperationMode(mode) => {
                s.operation_mode = mode;
                false
            }
            Input::SetRenewablePenetration(pct) => {
                s.renewable_penetration = clamp_pct(pct);
                false
            }
            Input::SetBatteryCapacity(pct) => {
                s.battery_capacity = clamp_pct(pct);
                false
            }
            Input::SetBackupGenerators(on) => {
                s.backup_generators = on;
                false
            }
            Input::SetLoadShifting(on) => {
                s.load_shifting = on;
                false
            }
            Input::SetMonitoring(on) => {
                self.monitoring = on;
                false
            }
        }
    }

    /// Re-derives the temperature for a new hour of day. Returns the new value.
    pub fn refresh(&mut self, hour: u32) -> i32 {
        self.hour = hour % 24;
        self.recompute_temp();
        self.state.current_temp
    }

    fn recompute_temp(&mut self) {
        let s = &mut self.state;
        s.current_temp = compute_current_temp(
            s.location.profile(),
            self.hour,
            s.heatwave_active,
            s.heatwave_intensity,
        );
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Hour of day of the last refresh.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Seed for the predictive series jitter.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Profile of the selected site.
    pub fn profile(&self) -> &'static LocationProfile {
        self.state.location.profile()
    }

    /// Metrics for the current state.
    pub fn metrics(&self) -> Metrics {
        derive_metrics(&self.state, self.profile())
    }

    /// Climate event for the equipment tables: scenario override, else the heatwave switch.
    pub fn climate_event(&self) -> ClimateEvent {
        self.climate_event_override
            .unwrap_or_else(|| self.state.climate_event())
    }

    /// Response plan whose trigger temperature is currently met, if any.
    pub fn active_plan(&self) -> Option<PlanLevel> {
        active_plan(self.state.current_temp, self.profile())
    }

    /// Serializable view of the session.
    pub fn snapshot(&self) -> Snapshot {
        let metrics = self.metrics();
        let profile = self.profile();
        Snapshot {
            state: self.state.clone(),
            location_name: profile.name,
            heatwave_threshold: profile.heatwave_threshold,
            hour: self.hour,
            monitoring: self.monitoring,
            climate_event: self.climate_event(),
            risk_band: metrics.risk_band(),
            active_plan: self.active_plan(),
            metrics,
        }
    }
}

/// Point-in-time view of a session for display surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub state: SimulationState,
    pub location_name: &'static str,
    pub heatwave_threshold: f64,
    pub hour: u32,
    pub monitoring: bool,
    pub climate_event: ClimateEvent,
    pub metrics: Metrics,
    pub risk_band: RiskBand,
    pub active_plan: Option<PlanLevel>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        writeln!(
            f,
            "{} @ {:02}:00 | {} | {}",
            self.location_name,
            self.hour,
            s.operation_mode,
            if self.monitoring { "monitoring" } else { "standby" },
        )?;
        let heatwave = if s.heatwave_active {
            format!("{} heatwave", s.heatwave_intensity)
        } else {
            "no heatwave".to_string()
        };
        writeln!(
            f,
            "Temperature {}°C (threshold {:.0}°C), {heatwave}",
            s.current_temp, self.heatwave_threshold
        )?;
        writeln!(
            f,
            "Renewables {:.0}%  battery {:.0}%  backup gen={}  load shifting={}",
            s.renewable_penetration, s.battery_capacity, s.backup_generators, s.load_shifting
        )?;
        match self.active_plan {
            Some(plan) => writeln!(f, "Active response plan: {plan}")?,
            None => writeln!(f, "Active response plan: none")?,
        }
        write!(f, "\n{}", self.metrics)
    }
}
