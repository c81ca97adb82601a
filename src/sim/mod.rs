/// Hour-of-day sources for the temperature model.
pub mod clock;
/// Energy mix breakdown for the current state.
pub mod energy_mix;
pub mod metrics;
pub mod session;
pub mod temperature;
/// Scheduled temperature refresh.
pub mod ticker;
pub mod types;
