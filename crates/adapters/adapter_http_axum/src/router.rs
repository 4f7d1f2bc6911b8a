//! Axum router assembly.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use devhub_app::ports::{DeviceRepository, LightService, TelemetrySink, TemperatureService};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R, L, T, S>(state: AppState<R, L, T, S>) -> Router
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness only: no dependency is checked.
async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "devhub"}))
}
