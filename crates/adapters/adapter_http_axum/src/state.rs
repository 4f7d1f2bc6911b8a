//! Shared application state for axum handlers.

use std::sync::Arc;

use devhub_app::ports::{DeviceRepository, LightService, TelemetrySink, TemperatureService};
use devhub_app::services::{CommandRouter, DeviceService};

/// Application state shared across all axum handlers.
///
/// Generic over the registry, the two upstream services and the telemetry
/// sink to avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone` — only the `Arc`
/// wrappers are cloned.
pub struct AppState<R, L, T, S> {
    /// Registry use-cases with enrichment.
    pub device_service: Arc<DeviceService<R, L, T, S>>,
    /// Command validation and dispatch.
    pub command_router: Arc<CommandRouter<R, L, T, S>>,
}

impl<R, L, T, S> Clone for AppState<R, L, T, S> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            command_router: Arc::clone(&self.command_router),
        }
    }
}

impl<R, L, T, S> AppState<R, L, T, S>
where
    R: DeviceRepository + Send + Sync + 'static,
    L: LightService + Send + Sync + 'static,
    T: TemperatureService + Send + Sync + 'static,
    S: TelemetrySink + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        device_service: DeviceService<R, L, T, S>,
        command_router: CommandRouter<R, L, T, S>,
    ) -> Self {
        Self {
            device_service: Arc::new(device_service),
            command_router: Arc::new(command_router),
        }
    }
}
