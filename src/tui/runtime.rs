//! TUI application state over a shared session.

use crate::catalog::plans::PlanLevel;
use crate::config::ScenarioConfig;
use crate::sim::session::{Input, SharedSession, Session, Snapshot};
use crate::sim::types::HeatwaveIntensity;

/// Step applied by the percentage keys.
const PCT_STEP: f64 = 5.0;

/// TUI application state.
///
/// The session itself is shared with the temperature ticker; the app only
/// reads snapshots and forwards inputs.
pub struct App {
    session: SharedSession,
    /// Name of the active preset, or `"scenario"` for a file.
    pub preset_name: String,
    /// Plan shown in the plan panel.
    pub viewed_plan: PlanLevel,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    pub fn new(session: SharedSession, preset_name: &str) -> Self {
        Self {
            session,
            preset_name: preset_name.to_string(),
            viewed_plan: PlanLevel::Moderate,
            quit: false,
        }
    }

    /// Current view of the session.
    pub fn snapshot(&self) -> Snapshot {
        self.session.blocking_read().snapshot()
    }

    /// Runs `f` against the locked session.
    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.session.blocking_read())
    }

    pub fn apply(&mut self, input: Input) {
        self.session.blocking_write().apply(input);
    }

    pub fn next_location(&mut self) {
        let next = self.with_session(|s| s.state().location.next());
        self.apply(Input::SelectLocation(next));
    }

    pub fn toggle_heatwave(&mut self) {
        let s = self.snapshot().state;
        // an active heatwave needs a real intensity to have any effect
        if !s.heatwave_active && s.heatwave_intensity == HeatwaveIntensity::None {
            self.apply(Input::SetHeatwaveIntensity(HeatwaveIntensity::Moderate));
        }
        self.apply(Input::SetHeatwaveActive(!s.heatwave_active));
    }

    pub fn cycle_intensity(&mut self) {
        let next = self.with_session(|s| s.state().heatwave_intensity.next());
        self.apply(Input::SetHeatwaveIntensity(next));
    }

    pub fn toggle_mode(&mut self) {
        let next = self.with_session(|s| s.state().operation_mode.toggled());
        self.apply(Input::SetOperationMode(next));
    }

    pub fn toggle_generators(&mut self) {
        let on = self.with_session(|s| s.state().backup_generators);
        self.apply(Input::SetBackupGenerators(!on));
    }

    pub fn toggle_load_shifting(&mut self) {
        let on = self.with_session(|s| s.state().load_shifting);
        self.apply(Input::SetLoadShifting(!on));
    }

    pub fn toggle_monitoring(&mut self) {
        let on = self.with_session(Session::is_monitoring);
        self.apply(Input::SetMonitoring(!on));
    }

    /// Nudges renewable penetration by `sign * 5` points.
    pub fn adjust_renewables(&mut self, sign: f64) {
        let pct = self.with_session(|s| s.state().renewable_penetration);
        self.apply(Input::SetRenewablePenetration(pct + sign * PCT_STEP));
    }

    /// Nudges battery capacity by `sign * 5` points.
    pub fn adjust_battery(&mut self, sign: f64) {
        let pct = self.with_session(|s| s.state().battery_capacity);
        self.apply(Input::SetBatteryCapacity(pct + sign * PCT_STEP));
    }

    pub fn cycle_plan(&mut self) {
        self.viewed_plan = match self.viewed_plan {
            PlanLevel::Moderate => PlanLevel::Severe,
            PlanLevel::Severe => PlanLevel::Extreme,
            PlanLevel::Extreme => PlanLevel::Moderate,
        };
    }

    /// Replaces the session with a preset, keeping the current hour.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        let mut session = self.session.blocking_write();
        let hour = session.hour();
        *session = Session::from_scenario(&scenario, hour);
        self.preset_name = name.to_string();
    }

    /// Restores the active preset.
    pub fn restart(&mut self) {
        let name = self.preset_name.clone();
        self.switch_preset(&name);
    }
}
