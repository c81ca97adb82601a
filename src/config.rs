//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::ticker::DEFAULT_TICK;
use crate::sim::types::{ClimateEvent, HeatwaveIntensity, Location, OperationMode, SimulationState};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Initial state and timing.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Facility-level overrides.
    #[serde(default)]
    pub facility: FacilityConfig,
}

/// Initial simulation state and timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub location: Location,
    pub operation_mode: OperationMode,
    /// Renewable share (%, 0–100).
    pub renewable_penetration: f64,
    /// Battery state of charge (%, 0–100).
    pub battery_capacity: f64,
    pub backup_generators: bool,
    pub load_shifting: bool,
    pub heatwave_active: bool,
    pub heatwave_intensity: HeatwaveIntensity,
    /// Seed for the prediction series noise.
    pub seed: u64,
    /// Temperature refresh period (seconds, must be > 0).
    pub tick_interval_secs: u64,
    /// Fixed hour of day (0–23). Unset means wall-clock time.
    pub hour: Option<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let state = SimulationState::default();
        Self {
            location: state.location,
            operation_mode: state.operation_mode,
            renewable_penetration: state.renewable_penetration,
            battery_capacity: state.battery_capacity,
            backup_generators: state.backup_generators,
            load_shifting: state.load_shifting,
            heatwave_active: state.heatwave_active,
            heatwave_intensity: state.heatwave_intensity,
            seed: 42,
            tick_interval_secs: DEFAULT_TICK.as_secs(),
            hour: None,
        }
    }
}

/// Facility-level overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacilityConfig {
    /// Climate event for the equipment tables. Unset follows the heatwave switch.
    pub climate_event: Option<ClimateEvent>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.hour"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ScenarioConfig {
    /// Returns the baseline scenario: application start-up defaults.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Los Angeles under a moderate heatwave with load shifting enabled.
    pub fn moderate_heatwave() -> Self {
        Self {
            simulation: SimulationConfig {
                heatwave_active: true,
                heatwave_intensity: HeatwaveIntensity::Moderate,
                load_shifting: true,
                ..SimulationConfig::default()
            },
            facility: FacilityConfig::default(),
        }
    }

    /// Fresno under an extreme heatwave with a depleted battery.
    pub fn extreme_heatwave() -> Self {
        Self {
            simulation: SimulationConfig {
                location: Location::Fresno,
                heatwave_active: true,
                heatwave_intensity: HeatwaveIntensity::Extreme,
                battery_capacity: 25.0,
                renewable_penetration: 30.0,
                ..SimulationConfig::default()
            },
            facility: FacilityConfig::default(),
        }
    }

    /// Sacramento running islanded on a high renewable share during a storm.
    pub fn islanded() -> Self {
        Self {
            simulation: SimulationConfig {
                location: Location::Sacramento,
                operation_mode: OperationMode::Islanded,
                renewable_penetration: 75.0,
                battery_capacity: 90.0,
                ..SimulationConfig::default()
            },
            facility: FacilityConfig {
                climate_event: Some(ClimateEvent::Storm),
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "moderate_heatwave", "extreme_heatwave", "islanded"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "moderate_heatwave" => Ok(Self::moderate_heatwave()),
            "extreme_heatwave" => Ok(Self::extreme_heatwave()),
            "islanded" => Ok(Self::islanded()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        for (field, value) in [
            ("simulation.renewable_penetration", s.renewable_penetration),
            ("simulation.battery_capacity", s.battery_capacity),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be in [0, 100], got {value}"),
                });
            }
        }
        if s.tick_interval_secs == 0 {
            errors.push(ConfigError {
                field: "simulation.tick_interval_secs".into(),
                message: "must be > 0".into(),
            });
        }
        if let Some(hour) = s.hour.filter(|&h| h >= 24) {
            errors.push(ConfigError {
                field: "simulation.hour".into(),
                message: format!("must be < 24, got {hour}"),
            });
        }
        if s.heatwave_active && s.heatwave_intensity == HeatwaveIntensity::None {
            errors.push(ConfigError {
                field: "simulation.heatwave_intensity".into(),
                message: "must not be \"none\" while simulation.heatwave_active is set".into(),
            });
        }

        errors
    }

    /// Initial simulation state described by this scenario.
    ///
    /// `current_temp` is left at its default; the session derives it.
    pub fn initial_state(&self) -> SimulationState {
        let s = &self.simulation;
        SimulationState {
            location: s.location,
            operation_mode: s.operation_mode,
            renewable_penetration: s.renewable_penetration,
            battery_capacity: s.battery_capacity,
            backup_generators: s.backup_generators,
            load_shifting: s.load_shifting,
            heatwave_active: s.heatwave_active,
            heatwave_intensity: s.heatwave_intensity,
            ..SimulationState::default()
        }
    }
}
