//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde::Serialize;

use devhub_app::ports::{DeviceRepository, LightService, TelemetrySink, TemperatureService};

use crate::state::AppState;

/// Success envelope: `{"success": true, "data": …}`.
#[derive(Serialize)]
pub struct Success<D> {
    success: bool,
    data: D,
}

impl<D: Serialize> Success<D> {
    pub fn json(data: D) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Build the device API router.
pub fn routes<R, L, T, S>() -> Router<AppState<R, L, T, S>>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/devices",
            get(devices::list::<R, L, T, S>).post(devices::create::<R, L, T, S>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<R, L, T, S>)
                .put(devices::update::<R, L, T, S>)
                .delete(devices::delete::<R, L, T, S>),
        )
        .route(
            "/devices/{id}/commands",
            post(devices::command::<R, L, T, S>),
        )
}
