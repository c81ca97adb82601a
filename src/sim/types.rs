//! Core simulation types: sites, operating modes, and the mutable state record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed California sites the simulator can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    SanFrancisco,
    LosAngeles,
    Sacramento,
    Fresno,
}

impl Location {
    /// All selectable sites, in display order.
    pub const ALL: [Location; 4] = [
        Location::SanFrancisco,
        Location::LosAngeles,
        Location::Sacramento,
        Location::Fresno,
    ];

    /// Kebab-case identifier used in scenario files, the CLI and the API.
    pub fn slug(self) -> &'static str {
        match self {
            Location::SanFrancisco => "san-francisco",
            Location::LosAngeles => "los-angeles",
            Location::Sacramento => "sacramento",
            Location::Fresno => "fresno",
        }
    }

    /// Returns the next site in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Location::SanFrancisco => Location::LosAngeles,
            Location::LosAngeles => Location::Sacramento,
            Location::Sacramento => Location::Fresno,
            Location::Fresno => Location::SanFrancisco,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|l| l.slug() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Location::ALL.iter().map(|l| l.slug()).collect();
                format!("unknown location \"{s}\", available: {}", known.join(", "))
            })
    }
}

/// Whether the facility draws from the utility grid or runs on local sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationMode {
    #[default]
    GridConnected,
    Islanded,
}

impl OperationMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            OperationMode::GridConnected => OperationMode::Islanded,
            OperationMode::Islanded => OperationMode::GridConnected,
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationMode::GridConnected => f.write_str("grid-connected"),
            OperationMode::Islanded => f.write_str("islanded"),
        }
    }
}

/// Ordinal heatwave severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatwaveIntensity {
    #[default]
    None,
    Moderate,
    Severe,
    Extreme,
}

impl HeatwaveIntensity {
    /// Temperature offset (°C) added while a heatwave of this intensity is active.
    pub fn temp_offset_c(self) -> f64 {
        match self {
            HeatwaveIntensity::None => 0.0,
            HeatwaveIntensity::Moderate => 8.0,
            HeatwaveIntensity::Severe => 15.0,
            HeatwaveIntensity::Extreme => 22.0,
        }
    }

    /// Cycles through the selectable intensities (`none` is skipped).
    pub fn next(self) -> Self {
        match self {
            HeatwaveIntensity::None | HeatwaveIntensity::Extreme => HeatwaveIntensity::Moderate,
            HeatwaveIntensity::Moderate => HeatwaveIntensity::Severe,
            HeatwaveIntensity::Severe => HeatwaveIntensity::Extreme,
        }
    }
}

impl fmt::Display for HeatwaveIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeatwaveIntensity::None => "none",
            HeatwaveIntensity::Moderate => "moderate",
            HeatwaveIntensity::Severe => "severe",
            HeatwaveIntensity::Extreme => "extreme",
        };
        f.write_str(s)
    }
}

/// Climate event driving the facility equipment tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClimateEvent {
    #[default]
    None,
    Heatwave,
    Storm,
    Flood,
    Wildfire,
}

/// The simulation state record owned by a [`Session`](super::session::Session).
///
/// Percentage fields are kept in `[0, 100]` by the session's input handling.
/// `current_temp` is derived and never set from user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Selected site.
    pub location: Location,
    /// Grid-connected or islanded.
    pub operation_mode: OperationMode,
    /// Share of renewable generation (%).
    pub renewable_penetration: f64,
    /// Battery state of charge (%).
    pub battery_capacity: f64,
    /// Whether backup generators are available.
    pub backup_generators: bool,
    /// Whether load shifting is enabled.
    pub load_shifting: bool,
    /// Derived outdoor temperature (°C).
    pub current_temp: i32,
    /// Whether a heatwave is in progress.
    pub heatwave_active: bool,
    /// Severity of the heatwave when active.
    pub heatwave_intensity: HeatwaveIntensity,
    /// Grid stability (%), carried as state but not re-derived.
    pub grid_stability: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            location: Location::LosAngeles,
            operation_mode: OperationMode::GridConnected,
            renewable_penetration: 45.0,
            battery_capacity: 70.0,
            backup_generators: true,
            load_shifting: false,
            current_temp: 28,
            heatwave_active: false,
            heatwave_intensity: HeatwaveIntensity::None,
            grid_stability: 85.0,
        }
    }
}

impl SimulationState {
    /// Climate event implied by the heatwave switch.
    pub fn climate_event(&self) -> ClimateEvent {
        if self.heatwave_active {
            ClimateEvent::Heatwave
        } else {
            ClimateEvent::None
        }
    }

    /// `true` when an extreme heatwave is in progress.
    pub fn is_extreme_heatwave(&self) -> bool {
        self.heatwave_active && self.heatwave_intensity == HeatwaveIntensity::Extreme
    }
}

/// Clamps a percentage into `[0, 100]`. NaN collapses to 0.
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
