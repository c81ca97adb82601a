//! Outdoor temperature model: the periodic tick and the 24-hour forecast.

use std::f64::consts::PI;

use serde::Serialize;

use crate::climate::LocationProfile;

use super::types::HeatwaveIntensity;

/// Hours in the simulated day.
pub const HOURS_PER_DAY: u32 = 24;

/// Cooling demand ceiling for the forecast series (%).
const MAX_COOLING_DEMAND: f64 = 150.0;

/// Time-of-day adjustment (°C): afternoon peak, morning warming, night cooling.
pub fn time_of_day_offset_c(hour: u32) -> f64 {
    match hour {
        12..=18 => 8.0,
        6..=11 => 4.0,
        _ => -2.0,
    }
}

/// Computes the current outdoor temperature (°C, rounded).
///
/// Depends only on the site, the hour of day and the heatwave settings.
/// The intensity offset applies only while `heatwave_active` is set.
///
/// # Examples
///
/// ```
/// use heatwave_sim::sim::temperature::compute_current_temp;
/// use heatwave_sim::sim::types::{HeatwaveIntensity, Location};
///
/// let la = Location::LosAngeles.profile();
/// assert_eq!(compute_current_temp(la, 14, false, HeatwaveIntensity::None), 36);
/// assert_eq!(compute_current_temp(la, 14, true, HeatwaveIntensity::Extreme), 58);
/// ```
pub fn compute_current_temp(
    profile: &LocationProfile,
    hour: u32,
    heatwave_active: bool,
    intensity: HeatwaveIntensity,
) -> i32 {
    let mut temp = profile.avg_summer_temp + time_of_day_offset_c(hour);
    if heatwave_active {
        temp += intensity.temp_offset_c();
    }
    js_round(temp)
}

/// One hour of the 24-hour temperature forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub hour: u32,
    /// Rounded temperature (°C).
    pub temperature: i32,
    /// Cooling demand relative to baseline (%), capped at 150.
    pub cooling_demand: f64,
}

/// Heatwave uplift used by the forecast curve.
///
/// Differs from the tick offsets: any intensity below severe forecasts +10.
fn forecast_heatwave_effect(heatwave_active: bool, intensity: HeatwaveIntensity) -> f64 {
    if !heatwave_active {
        return 0.0;
    }
    match intensity {
        HeatwaveIntensity::Extreme => 20.0,
        HeatwaveIntensity::Severe => 15.0,
        HeatwaveIntensity::Moderate | HeatwaveIntensity::None => 10.0,
    }
}

/// Builds the sinusoidal 24-hour forecast for a site.
pub fn forecast_24h(
    profile: &LocationProfile,
    heatwave_active: bool,
    intensity: HeatwaveIntensity,
) -> Vec<ForecastPoint> {
    let effect = forecast_heatwave_effect(heatwave_active, intensity);
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let base = profile.avg_summer_temp + 8.0 * (f64::from(hour) * PI / 12.0).sin();
            let temp = base + effect;
            ForecastPoint {
                hour,
                temperature: js_round(temp),
                cooling_demand: (100.0 + (temp - profile.avg_summer_temp) * 3.0)
                    .min(MAX_COOLING_DEMAND),
            }
        })
        .collect()
}

/// Rounds half-way cases towards positive infinity.
pub(crate) fn js_round(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::Location;

    #[test]
    fn afternoon_without_heatwave() {
        let la = Location::LosAngeles.profile();
        assert_eq!(compute_current_temp(la, 14, false, HeatwaveIntensity::None), 36);
    }

    #[test]
    fn afternoon_extreme_heatwave() {
        let la = Location::LosAngeles.profile();
        assert_eq!(
            compute_current_temp(la, 14, true, HeatwaveIntensity::Extreme),
            58
        );
    }

    #[test]
    fn intensity_ignored_when_inactive() {
        let la = Location::LosAngeles.profile();
        assert_eq!(
            compute_current_temp(la, 14, false, HeatwaveIntensity::Extreme),
            36
        );
    }

    #[test]
    fn time_of_day_bands() {
        assert_eq!(time_of_day_offset_c(0), -2.0);
        assert_eq!(time_of_day_offset_c(5), -2.0);
        assert_eq!(time_of_day_offset_c(6), 4.0);
        assert_eq!(time_of_day_offset_c(11), 4.0);
        assert_eq!(time_of_day_offset_c(12), 8.0);
        assert_eq!(time_of_day_offset_c(18), 8.0);
        assert_eq!(time_of_day_offset_c(19), -2.0);
        assert_eq!(time_of_day_offset_c(23), -2.0);
    }

    #[test]
    fn night_and_morning_values() {
        let sf = Location::SanFrancisco.profile();
        assert_eq!(compute_current_temp(sf, 2, false, HeatwaveIntensity::None), 20);
        assert_eq!(
            compute_current_temp(sf, 9, true, HeatwaveIntensity::Moderate),
            34
        );
        let fresno = Location::Fresno.profile();
        assert_eq!(
            compute_current_temp(fresno, 22, true, HeatwaveIntensity::Severe),
            48
        );
    }

    #[test]
    fn js_round_half_up() {
        assert_eq!(js_round(2.5), 3);
        assert_eq!(js_round(-2.5), -2);
        assert_eq!(js_round(2.49), 2);
    }

    #[test]
    fn forecast_has_24_points() {
        let f = forecast_24h(
            Location::Sacramento.profile(),
            false,
            HeatwaveIntensity::None,
        );
        assert_eq!(f.len(), 24);
        assert_eq!(f[0].hour, 0);
        assert_eq!(f[23].hour, 23);
    }

    #[test]
    fn forecast_peak_and_trough() {
        let la = Location::LosAngeles.profile();
        let f = forecast_24h(la, false, HeatwaveIntensity::None);
        // sin peaks at hour 6 and bottoms at hour 18
        assert_eq!(f[6].temperature, 36);
        assert_eq!(f[18].temperature, 20);
        assert_eq!(f[0].temperature, 28);
        assert!((f[0].cooling_demand - 100.0).abs() < 1e-9);
        assert!((f[6].cooling_demand - 124.0).abs() < 1e-9);
    }

    #[test]
    fn forecast_heatwave_effects() {
        let la = Location::LosAngeles.profile();
        let moderate = forecast_24h(la, true, HeatwaveIntensity::Moderate);
        let severe = forecast_24h(la, true, HeatwaveIntensity::Severe);
        let extreme = forecast_24h(la, true, HeatwaveIntensity::Extreme);
        assert_eq!(moderate[0].temperature, 38);
        assert_eq!(severe[0].temperature, 43);
        assert_eq!(extreme[0].temperature, 48);
        // 100 + (56 - 28) * 3 = 184, capped
        assert_eq!(extreme[6].cooling_demand, 150.0);
    }
}
