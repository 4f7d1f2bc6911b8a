//! Thermostat adapter — drives the temperature service.

use devhub_domain::command::{Ack, Command};
use devhub_domain::error::{DevHubError, UnsupportedCommandError};
use devhub_domain::id::DeviceId;

use super::CommandAdapter;
use crate::ports::TemperatureService;

/// Translates `set_temperature` into a heat command on the temperature
/// service. The target is read from the `temperature` parameter.
pub struct ThermostatAdapter<T> {
    service: T,
}

impl<T> ThermostatAdapter<T> {
    pub fn new(service: T) -> Self {
        Self { service }
    }
}

impl<T: TemperatureService + Send + Sync> CommandAdapter for ThermostatAdapter<T> {
    const NAME: &'static str = "thermostat";

    #[tracing::instrument(skip(self, command), fields(action = %command.action))]
    async fn execute(&self, device_id: DeviceId, command: &Command) -> Result<Ack, DevHubError> {
        if command.action != "set_temperature" {
            return Err(unsupported(command, "unknown action"));
        }
        let target = command
            .parameter("temperature")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| {
                unsupported(command, "set_temperature requires a numeric temperature")
            })?;

        self.service
            .set_target_temperature(device_id, target)
            .await?;
        Ok(Ack { adapter: Self::NAME })
    }
}

fn unsupported(command: &Command, reason: &'static str) -> DevHubError {
    UnsupportedCommandError {
        family: "thermostat",
        action: command.action.clone(),
        reason,
    }
    .into()
}
