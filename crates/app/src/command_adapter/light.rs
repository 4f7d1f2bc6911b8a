//! Light adapter — drives the lamp control service.

use serde_json::Value;

use devhub_domain::command::{Ack, Command};
use devhub_domain::error::{DevHubError, UnsupportedCommandError};
use devhub_domain::id::DeviceId;

use super::CommandAdapter;
use crate::ports::LightService;

/// Brightness applied when `set_brightness` carries no value.
pub const DEFAULT_BRIGHTNESS: u8 = 100;

const MAX_BRIGHTNESS: u64 = 100;

/// Translates `turn_on`, `set_brightness` and `set_color` into lamp
/// service calls.
pub struct LightAdapter<L> {
    service: L,
}

impl<L> LightAdapter<L> {
    pub fn new(service: L) -> Self {
        Self { service }
    }
}

impl<L: LightService + Send + Sync> CommandAdapter for LightAdapter<L> {
    const NAME: &'static str = "light";

    #[tracing::instrument(skip(self, command), fields(action = %command.action))]
    async fn execute(&self, device_id: DeviceId, command: &Command) -> Result<Ack, DevHubError> {
        match command.action.as_str() {
            "turn_on" => self.service.toggle(device_id).await?,
            "set_brightness" => {
                let brightness = brightness(command)?;
                self.service.set_brightness(device_id, brightness).await?;
            }
            "set_color" => {
                if command.parameters.is_empty() {
                    return Err(unsupported(command, "set_color requires color parameters"));
                }
                self.service
                    .set_color(device_id, command.parameters.clone())
                    .await?;
            }
            _ => return Err(unsupported(command, "unknown action")),
        }
        Ok(Ack { adapter: Self::NAME })
    }
}

fn brightness(command: &Command) -> Result<u8, DevHubError> {
    match command.parameter("brightness") {
        None | Some(Value::Null) => Ok(DEFAULT_BRIGHTNESS),
        Some(value) => whole_number(value)
            .filter(|level| *level <= MAX_BRIGHTNESS)
            .and_then(|level| u8::try_from(level).ok())
            .ok_or_else(|| {
                unsupported(command, "brightness must be an integer between 0 and 100")
            }),
    }
}

/// Whole numbers sent as floats (`50.0`) count as integers.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|level| level.fract() == 0.0 && (0.0..=100.0).contains(level))
            .map(|level| level as u64)
    })
}

fn unsupported(command: &Command, reason: &'static str) -> DevHubError {
    UnsupportedCommandError {
        family: "light",
        action: command.action.clone(),
        reason,
    }
    .into()
}
