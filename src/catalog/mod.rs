//! Static status and lookup tables keyed by the simulation state.

pub mod actions;
pub mod equipment;
pub mod network;
/// Automated heatwave response plans.
pub mod plans;
pub mod predictive;
