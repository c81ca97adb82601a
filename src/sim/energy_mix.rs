use serde::Serialize;

use super::types::{OperationMode, SimulationState};

/// Share of supply per source (%). Shares are independent and need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyMix {
    pub renewable: f64,
    pub grid: f64,
    pub backup: f64,
}

/// Supply breakdown for the current state.
///
/// A heatwave curtails renewables by 15 points (floor 20) and pushes more
/// load onto the grid and backup generation.
pub fn energy_mix(state: &SimulationState) -> EnergyMix {
    let hw = state.heatwave_active;
    let renewable = if hw {
        (state.renewable_penetration - 15.0).max(20.0)
    } else {
        state.renewable_penetration
    };
    let grid = match state.operation_mode {
        OperationMode::GridConnected if hw => 45.0,
        OperationMode::GridConnected => 35.0,
        OperationMode::Islanded => 0.0,
    };
    let backup = match (state.backup_generators, hw) {
        (true, true) => 35.0,
        (true, false) => 15.0,
        (false, _) => 0.0,
    };
    EnergyMix {
        renewable,
        grid,
        backup,
    }
}
