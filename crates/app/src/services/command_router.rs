//! Command router — validates device state and dispatches a command to
//! the adapter for the device's family.

use serde_json::{Map, Value};

use devhub_domain::command::{Command, CommandOutcome};
use devhub_domain::error::{DevHubError, InvalidStateError, NotFoundError};
use devhub_domain::id::DeviceId;
use devhub_domain::telemetry::{COUNT_UNIT, metric};

use crate::command_adapter::{AdapterKind, AdapterSet};
use crate::ports::{DeviceRepository, LightService, TelemetrySink, TemperatureService};
use crate::services::telemetry::TelemetryEmitter;

/// Routes commands from clients to upstream services.
pub struct CommandRouter<R, L, T, S> {
    repo: R,
    adapters: AdapterSet<L, T>,
    telemetry: TelemetryEmitter<S>,
}

impl<R, L, T, S> CommandRouter<R, L, T, S>
where
    R: DeviceRepository + Send + Sync,
    L: LightService + Send + Sync,
    T: TemperatureService + Send + Sync,
    S: TelemetrySink + Send + Sync,
{
    pub fn new(repo: R, adapters: AdapterSet<L, T>, telemetry: TelemetryEmitter<S>) -> Self {
        Self {
            repo,
            adapters,
            telemetry,
        }
    }

    /// Validate and dispatch `command` to device `id`.
    ///
    /// The registry is only read. Exactly one upstream call is attempted
    /// and a `command_executed` event is emitted only after it succeeds.
    ///
    /// # Errors
    ///
    /// - [`DevHubError::NotFound`] when the device does not exist.
    /// - [`DevHubError::InvalidState`] when the device is not active; no
    ///   upstream call is made.
    /// - [`DevHubError::UnsupportedCommand`], [`DevHubError::ServiceUnavailable`]
    ///   or [`DevHubError::DispatchFailed`] from the selected adapter.
    #[tracing::instrument(skip(self, command), fields(action = %command.action))]
    pub async fn dispatch(
        &self,
        id: DeviceId,
        command: Command,
    ) -> Result<CommandOutcome, DevHubError> {
        let device = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Device",
                id: id.to_string(),
            })?;

        if !device.status.is_active() {
            return Err(InvalidStateError {
                device_id: id.to_string(),
                status: device.status.to_string(),
            }
            .into());
        }

        let kind = AdapterKind::for_device_type(&device.device_type);
        let ack = self.adapters.execute(kind, id, &command).await?;
        tracing::info!(adapter = ack.adapter, "command accepted upstream");

        self.telemetry
            .emit_metric(
                id,
                metric::COMMAND_EXECUTED,
                1.0,
                COUNT_UNIT,
                command_metadata(command),
            )
            .await;

        Ok(CommandOutcome::accepted())
    }
}

fn command_metadata(command: Command) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("action".to_string(), Value::String(command.action));
    metadata.insert("parameters".to_string(), Value::Object(command.parameters));
    metadata.insert("priority".to_string(), Value::String(command.priority));
    metadata
}
