//! Climate-risk simulator for a fictional network of California data centers.

#[cfg(feature = "api")]
pub mod api;
/// Static decision-support catalogs: actions, plans, equipment, sites, predictions.
pub mod catalog;
pub mod climate;
pub mod config;
pub mod error;
pub mod io;
/// Simulation state, derivations, session container and ticker.
pub mod sim;
pub mod telemetry;
#[cfg(feature = "tui")]
pub mod tui;
