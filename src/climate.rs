//! Static climate profiles for the selectable sites.

use serde::Serialize;

use crate::sim::types::Location;

/// One year of recorded heatwave activity at a site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatwaveRecord {
    pub year: u16,
    /// Number of heatwave events that year.
    pub events: u32,
    /// Peak temperature reached (°C).
    pub max_temp: i32,
    /// Longest event duration (days).
    pub duration_days: u32,
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

/// Static reference record for a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationProfile {
    pub name: &'static str,
    pub coords: Coords,
    /// Average summer temperature (°C).
    pub avg_summer_temp: f64,
    /// Temperature above which a heatwave is declared (°C).
    pub heatwave_threshold: f64,
    pub historical_heatwaves: &'static [HeatwaveRecord],
}

/// A historical record enriched with its impact score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalImpact {
    #[serde(flatten)]
    pub record: HeatwaveRecord,
    /// `min(100, (max_temp - threshold) / 20 * 100)`.
    pub impact: f64,
}

const fn rec(year: u16, events: u32, max_temp: i32, duration_days: u32) -> HeatwaveRecord {
    HeatwaveRecord {
        year,
        events,
        max_temp,
        duration_days,
    }
}

static SAN_FRANCISCO: LocationProfile = LocationProfile {
    name: "San Francisco",
    coords: Coords {
        lat: 37.7749,
        lng: -122.4194,
    },
    avg_summer_temp: 22.0,
    heatwave_threshold: 32.0,
    historical_heatwaves: &[
        rec(2023, 3, 38, 4),
        rec(2022, 2, 35, 3),
        rec(2021, 4, 41, 6),
        rec(2020, 2, 37, 2),
    ],
};

static LOS_ANGELES: LocationProfile = LocationProfile {
    name: "Los Angeles",
    coords: Coords {
        lat: 34.0522,
        lng: -118.2437,
    },
    avg_summer_temp: 28.0,
    heatwave_threshold: 38.0,
    historical_heatwaves: &[
        rec(2023, 5, 45, 7),
        rec(2022, 4, 43, 5),
        rec(2021, 6, 47, 9),
        rec(2020, 3, 42, 4),
    ],
};

static SACRAMENTO: LocationProfile = LocationProfile {
    name: "Sacramento",
    coords: Coords {
        lat: 38.5816,
        lng: -121.4944,
    },
    avg_summer_temp: 32.0,
    heatwave_threshold: 40.0,
    historical_heatwaves: &[
        rec(2023, 6, 48, 8),
        rec(2022, 5, 46, 6),
        rec(2021, 7, 49, 10),
        rec(2020, 4, 45, 5),
    ],
};

static FRESNO: LocationProfile = LocationProfile {
    name: "Fresno",
    coords: Coords {
        lat: 36.7378,
        lng: -119.7871,
    },
    avg_summer_temp: 35.0,
    heatwave_threshold: 42.0,
    historical_heatwaves: &[
        rec(2023, 8, 51, 12),
        rec(2022, 7, 49, 9),
        rec(2021, 9, 52, 14),
        rec(2020, 6, 48, 7),
    ],
};

impl Location {
    /// Returns the static climate profile for this site.
    pub fn profile(self) -> &'static LocationProfile {
        match self {
            Location::SanFrancisco => &SAN_FRANCISCO,
            Location::LosAngeles => &LOS_ANGELES,
            Location::Sacramento => &SACRAMENTO,
            Location::Fresno => &FRESNO,
        }
    }
}

impl LocationProfile {
    /// Mean heatwave events per recorded year.
    pub fn avg_events_per_year(&self) -> f64 {
        if self.historical_heatwaves.is_empty() {
            return 0.0;
        }
        let total: u32 = self.historical_heatwaves.iter().map(|hw| hw.events).sum();
        f64::from(total) / self.historical_heatwaves.len() as f64
    }

    /// Highest temperature on record (°C), if any history exists.
    pub fn record_high(&self) -> Option<i32> {
        self.historical_heatwaves.iter().map(|hw| hw.max_temp).max()
    }

    /// Historical records with their impact score, in table order.
    pub fn historical_impacts(&self) -> Vec<HistoricalImpact> {
        self.historical_heatwaves
            .iter()
            .map(|&record| HistoricalImpact {
                record,
                impact: ((f64::from(record.max_temp) - self.heatwave_threshold) / 20.0 * 100.0)
                    .min(100.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn los_angeles_profile() {
        let p = Location::LosAngeles.profile();
        assert_eq!(p.name, "Los Angeles");
        assert_eq!(p.avg_summer_temp, 28.0);
        assert_eq!(p.heatwave_threshold, 38.0);
        assert_eq!(p.historical_heatwaves.len(), 4);
    }

    #[test]
    fn avg_events_per_year() {
        // 8 + 7 + 9 + 6 = 30 over 4 years
        assert_eq!(Location::Fresno.profile().avg_events_per_year(), 7.5);
        // 3 + 2 + 4 + 2 = 11
        assert_eq!(Location::SanFrancisco.profile().avg_events_per_year(), 2.75);
    }

    #[test]
    fn record_high() {
        assert_eq!(Location::Sacramento.profile().record_high(), Some(49));
        assert_eq!(Location::Fresno.profile().record_high(), Some(52));
    }

    #[test]
    fn historical_impact_scores() {
        let impacts = Location::LosAngeles.profile().historical_impacts();
        // (45 - 38) / 20 * 100 = 35
        assert!((impacts[0].impact - 35.0).abs() < 1e-9);
        // (47 - 38) / 20 * 100 = 45
        assert!((impacts[2].impact - 45.0).abs() < 1e-9);
        assert!(impacts.iter().all(|i| i.impact <= 100.0));
    }

    #[test]
    fn every_location_has_a_profile() {
        for loc in Location::ALL {
            let p = loc.profile();
            assert!(p.heatwave_threshold > p.avg_summer_temp);
        }
    }
}
