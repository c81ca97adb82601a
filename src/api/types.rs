//! API response types.

use serde::Serialize;

use crate::catalog::actions::{Action, ActionSummary};
use crate::catalog::equipment::{FacilityEquipment, SummaryCard};
use crate::catalog::network::{DataCenter, NetworkSummary};
use crate::catalog::plans::{HeatwavePlan, PlanLevel, TimelinePoint};
use crate::catalog::predictive::{PredictionPoint, PredictiveReport};
use crate::climate::{HistoricalImpact, LocationProfile};
use crate::sim::energy_mix::EnergyMix;
use crate::sim::metrics::{Metrics, RiskBand};
use crate::sim::session::Snapshot;
use crate::sim::types::ClimateEvent;

/// Session snapshot plus the energy mix.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub energy_mix: EnergyMix,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub metrics: Metrics,
    /// Cooling load clamped to 100 for gauges.
    pub cooling_load_display: f64,
    pub risk_band: RiskBand,
}

/// Selected site's profile and its history.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub profile: &'static LocationProfile,
    pub avg_events_per_year: f64,
    pub record_high: Option<i32>,
    pub historical: Vec<HistoricalImpact>,
}

#[derive(Debug, Serialize)]
pub struct ActionsResponse {
    pub actions: Vec<Action>,
    pub summary: ActionSummary,
}

#[derive(Debug, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: HeatwavePlan,
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub active_plan: Option<PlanLevel>,
    pub plans: Vec<PlanView>,
}

#[derive(Debug, Serialize)]
pub struct FacilityResponse {
    pub climate_event: ClimateEvent,
    pub equipment: FacilityEquipment,
    pub summary: [SummaryCard; 4],
}

#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    pub sites: Vec<DataCenter>,
    pub summary: NetworkSummary,
}

#[derive(Debug, Serialize)]
pub struct PredictiveResponse {
    #[serde(flatten)]
    pub report: PredictiveReport,
    pub series: Vec<PredictionPoint>,
}

/// Error body for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
