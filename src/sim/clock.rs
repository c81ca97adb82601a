/// Source of the hour of day that drives the temperature model.
///
/// The ticker asks its clock for the hour on every refresh, so tests can
/// substitute a fixed hour for the wall clock.
///
/// # Examples
///
/// ```
/// use heatwave_sim::sim::clock::{FixedHour, HourSource};
///
/// let clock = FixedHour::new(14);
/// assert_eq!(clock.hour(), 14);
/// ```
pub trait HourSource: Send + Sync + 'static {
    /// Returns the current hour in `0..24`.
    fn hour(&self) -> u32;
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl HourSource for WallClock {
    fn hour(&self) -> u32 {
        use chrono::Timelike;
        chrono::Local::now().hour()
    }
}

/// A clock pinned to one hour of the day.
#[derive(Debug, Clone, Copy)]
pub struct FixedHour {
    hour: u32,
}

impl FixedHour {
    /// Creates a fixed clock. Hours past 23 wrap around the day.
    pub fn new(hour: u32) -> Self {
        Self { hour: hour % 24 }
    }
}

impl HourSource for FixedHour {
    fn hour(&self) -> u32 {
        self.hour
    }
}

impl<C: HourSource> HourSource for std::sync::Arc<C> {
    fn hour(&self) -> u32 {
        (**self).hour()
    }
}
