//! REST API over a live simulation session.
//!
//! GET endpoints read the shared session; `POST /input` applies one input.
//! While serving, a ticker refreshes the temperature on the scenario's
//! interval and stops with the server.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{Error, Result};
use crate::sim::clock::HourSource;
use crate::sim::session::SharedSession;
use crate::sim::ticker::spawn_ticker;
use crate::telemetry::shutdown_signal;

/// Application state shared across all request handlers.
pub struct AppState {
    /// The live session, also written by the ticker.
    pub session: SharedSession,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/metrics", get(handlers::get_metrics))
        .route("/location", get(handlers::get_location))
        .route("/forecast", get(handlers::get_forecast))
        .route("/actions", get(handlers::get_actions))
        .route("/plans", get(handlers::get_plans))
        .route("/facility", get(handlers::get_facility))
        .route("/network", get(handlers::get_network))
        .route("/predictive", get(handlers::get_predictive))
        .route("/input", post(handlers::post_input))
        .with_state(state)
}

/// Binds to `addr` and serves the API until Ctrl+C.
///
/// The temperature ticker runs for the lifetime of the server and is
/// cancelled on shutdown.
///
/// # Errors
///
/// Returns [`Error::Server`] if the listener cannot bind or serving fails.
pub async fn serve<C: HourSource>(
    session: SharedSession,
    clock: C,
    tick: Duration,
    addr: SocketAddr,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(Error::Server)?;
    info!(%addr, "API server listening");

    let token = CancellationToken::new();
    let ticker = spawn_ticker(session.clone(), clock, tick, token.clone());

    let app = router(Arc::new(AppState { session }));
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Server);

    token.cancel();
    let _ = ticker.await;
    served
}
