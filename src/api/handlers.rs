//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{
    ActionsResponse, ErrorResponse, FacilityResponse, LocationResponse, MetricsResponse,
    NetworkResponse, PlanView, PlansResponse, PredictiveResponse, StateResponse,
};
use crate::catalog::actions::{recommended_actions, summarize};
use crate::catalog::equipment::{facility_equipment, facility_summary};
use crate::catalog::network::{data_centers, network_summary};
use crate::catalog::plans::all_plans;
use crate::catalog::predictive::{prediction_series, predictive_report};
use crate::sim::energy_mix::energy_mix;
use crate::sim::session::Input;
use crate::sim::temperature::{ForecastPoint, forecast_24h};

type Shared = State<Arc<AppState>>;

/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(app): Shared) -> Json<StateResponse> {
    let session = app.session.read().await;
    Json(StateResponse {
        snapshot: session.snapshot(),
        energy_mix: energy_mix(session.state()),
    })
}

/// `GET /metrics` → 200 + `MetricsResponse` JSON
pub async fn get_metrics(State(app): Shared) -> Json<MetricsResponse> {
    let metrics = app.session.read().await.metrics();
    Json(MetricsResponse {
        metrics,
        cooling_load_display: metrics.cooling_load_display(),
        risk_band: metrics.risk_band(),
    })
}

/// `GET /location` → 200 + `LocationResponse` JSON
pub async fn get_location(State(app): Shared) -> Json<LocationResponse> {
    let profile = app.session.read().await.profile();
    Json(LocationResponse {
        profile,
        avg_events_per_year: profile.avg_events_per_year(),
        record_high: profile.record_high(),
        historical: profile.historical_impacts(),
    })
}

/// `GET /forecast` → 200 + 24 `ForecastPoint`s
pub async fn get_forecast(State(app): Shared) -> Json<Vec<ForecastPoint>> {
    let session = app.session.read().await;
    let s = session.state();
    Json(forecast_24h(
        session.profile(),
        s.heatwave_active,
        s.heatwave_intensity,
    ))
}

/// `GET /actions` → 200 + `ActionsResponse` JSON
pub async fn get_actions(State(app): Shared) -> Json<ActionsResponse> {
    let actions = recommended_actions(app.session.read().await.state());
    let summary = summarize(&actions);
    Json(ActionsResponse { actions, summary })
}

/// `GET /plans` → 200 + `PlansResponse` JSON
pub async fn get_plans(State(app): Shared) -> Json<PlansResponse> {
    let session = app.session.read().await;
    let plans = all_plans(session.state(), session.profile())
        .into_iter()
        .map(|plan| PlanView {
            timeline: plan.success_timeline(),
            plan,
        })
        .collect();
    Json(PlansResponse {
        active_plan: session.active_plan(),
        plans,
    })
}

/// `GET /facility` → 200 + `FacilityResponse` JSON
pub async fn get_facility(State(app): Shared) -> Json<FacilityResponse> {
    let session = app.session.read().await;
    let climate_event = session.climate_event();
    Json(FacilityResponse {
        climate_event,
        equipment: facility_equipment(session.state(), climate_event),
        summary: facility_summary(session.state()),
    })
}

/// `GET /network` → 200 + `NetworkResponse` JSON
pub async fn get_network(State(app): Shared) -> Json<NetworkResponse> {
    let session = app.session.read().await;
    let sites = data_centers(session.state(), &session.metrics());
    let summary = network_summary(&sites);
    Json(NetworkResponse { sites, summary })
}

/// `GET /predictive` → 200 + `PredictiveResponse` JSON
pub async fn get_predictive(State(app): Shared) -> Json<PredictiveResponse> {
    let session = app.session.read().await;
    let event = session.climate_event();
    Json(PredictiveResponse {
        report: predictive_report(session.state(), event),
        series: prediction_series(event, session.seed()),
    })
}

/// Applies one input and returns the new state.
///
/// `POST /input` → 200 + `StateResponse` JSON
/// malformed body → 400 + `ErrorResponse`
pub async fn post_input(
    State(app): Shared,
    body: Result<Json<Input>, JsonRejection>,
) -> Result<Json<StateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(input) = body.map_err(|rejection| {
        warn!(error = %rejection, "rejected input");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    let mut session = app.session.write().await;
    session.apply(input);
    Ok(Json(StateResponse {
        snapshot: session.snapshot(),
        energy_mix: energy_mix(session.state()),
    }))
}
