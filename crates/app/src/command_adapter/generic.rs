//! Generic adapter — accepts anything for devices without an integration.

use devhub_domain::command::{Ack, Command};
use devhub_domain::error::DevHubError;
use devhub_domain::id::DeviceId;

use super::CommandAdapter;

/// No-op adapter. Unknown device types must never block the command flow,
/// so every action succeeds without an upstream call.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericAdapter;

impl CommandAdapter for GenericAdapter {
    const NAME: &'static str = "generic";

    async fn execute(&self, device_id: DeviceId, command: &Command) -> Result<Ack, DevHubError> {
        tracing::debug!(%device_id, action = %command.action, "no integration, accepting as no-op");
        Ok(Ack { adapter: Self::NAME })
    }
}
