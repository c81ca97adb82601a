//! The California data-center network.

use serde::Serialize;

use crate::climate::Coords;
use crate::sim::metrics::Metrics;
use crate::sim::types::{Location, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Operational,
    Warning,
    Critical,
    Offline,
}

impl SiteStatus {
    /// Alert text shown for a degraded site.
    pub fn alert(self) -> Option<&'static str> {
        match self {
            SiteStatus::Operational => None,
            SiteStatus::Warning => Some("Elevated temperature detected. Monitoring closely."),
            SiteStatus::Critical => {
                Some("Critical temperature threshold exceeded. Emergency protocols active.")
            }
            SiteStatus::Offline => Some("Data center offline. Investigating connectivity issues."),
        }
    }
}

/// Reference values for one facility when it is not the selected site.
struct SiteDefaults {
    id: &'static str,
    name: &'static str,
    city: &'static str,
    /// Selectable location this facility tracks, if any.
    tracks: Option<Location>,
    /// Whether an extreme heatwave escalates the site to critical.
    escalates: bool,
    temperature: f64,
    uptime: f64,
    load: f64,
    capacity_mw: f64,
    servers: u32,
    coords: Coords,
}

const SITES: [SiteDefaults; 6] = [
    SiteDefaults {
        id: "CA-SF-DC01",
        name: "San Francisco Primary",
        city: "San Francisco, CA",
        tracks: Some(Location::SanFrancisco),
        escalates: false,
        temperature: 24.0,
        uptime: 99.8,
        load: 65.0,
        capacity_mw: 2.5,
        servers: 1200,
        coords: Coords {
            lat: 37.7749,
            lng: -122.4194,
        },
    },
    SiteDefaults {
        id: "CA-LA-DC01",
        name: "Los Angeles Primary",
        city: "Los Angeles, CA",
        tracks: Some(Location::LosAngeles),
        escalates: true,
        temperature: 28.0,
        uptime: 99.6,
        load: 78.0,
        capacity_mw: 5.0,
        servers: 2400,
        coords: Coords {
            lat: 34.0522,
            lng: -118.2437,
        },
    },
    SiteDefaults {
        id: "CA-SAC-DC01",
        name: "Sacramento Regional",
        city: "Sacramento, CA",
        tracks: Some(Location::Sacramento),
        escalates: true,
        temperature: 32.0,
        uptime: 99.4,
        load: 85.0,
        capacity_mw: 3.2,
        servers: 1800,
        coords: Coords {
            lat: 38.5816,
            lng: -121.4944,
        },
    },
    SiteDefaults {
        id: "CA-FR-DC01",
        name: "Fresno Edge",
        city: "Fresno, CA",
        tracks: Some(Location::Fresno),
        escalates: true,
        temperature: 35.0,
        uptime: 99.2,
        load: 92.0,
        capacity_mw: 1.8,
        servers: 900,
        coords: Coords {
            lat: 36.7378,
            lng: -119.7871,
        },
    },
    SiteDefaults {
        id: "CA-SD-DC01",
        name: "San Diego Backup",
        city: "San Diego, CA",
        tracks: None,
        escalates: false,
        temperature: 26.0,
        uptime: 99.9,
        load: 45.0,
        capacity_mw: 2.0,
        servers: 1000,
        coords: Coords {
            lat: 32.7157,
            lng: -117.1611,
        },
    },
    SiteDefaults {
        id: "CA-SJ-DC01",
        name: "San Jose Tech Hub",
        city: "San Jose, CA",
        tracks: None,
        escalates: false,
        temperature: 23.0,
        uptime: 99.7,
        load: 68.0,
        capacity_mw: 4.5,
        servers: 2200,
        coords: Coords {
            lat: 37.3382,
            lng: -121.8863,
        },
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataCenter {
    pub id: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub status: SiteStatus,
    pub temperature: f64,
    pub uptime: f64,
    pub load: f64,
    pub capacity_mw: f64,
    pub servers: u32,
    pub coords: Coords,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<&'static str>,
}

/// All six facilities. The one at the selected location reports live values.
pub fn data_centers(state: &SimulationState, metrics: &Metrics) -> Vec<DataCenter> {
    SITES
        .iter()
        .map(|site| {
            let selected = site.tracks == Some(state.location);
            let status = if selected && state.heatwave_active {
                if site.escalates && state.is_extreme_heatwave() {
                    SiteStatus::Critical
                } else {
                    SiteStatus::Warning
                }
            } else {
                SiteStatus::Operational
            };
            let (temperature, uptime, load) = if selected {
                (
                    f64::from(state.current_temp),
                    metrics.uptime,
                    metrics.cooling_load,
                )
            } else {
                (site.temperature, site.uptime, site.load)
            };
            DataCenter {
                id: site.id,
                name: site.name,
                city: site.city,
                status,
                temperature,
                uptime,
                load,
                capacity_mw: site.capacity_mw,
                servers: site.servers,
                coords: site.coords,
                alert: status.alert(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub total: usize,
    pub operational: usize,
    pub under_stress: usize,
    pub total_capacity_mw: f64,
}

pub fn network_summary(sites: &[DataCenter]) -> NetworkSummary {
    let operational = sites
        .iter()
        .filter(|s| s.status == SiteStatus::Operational)
        .count();
    NetworkSummary {
        total: sites.len(),
        operational,
        under_stress: sites.len() - operational,
        total_capacity_mw: sites.iter().map(|s| s.capacity_mw).sum(),
    }
}
