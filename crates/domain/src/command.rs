//! Command — a transient control request addressed to a single device.
//!
//! Commands are never persisted. They live for the duration of one
//! dispatch and leave behind a [`CommandOutcome`] plus, on success, one
//! telemetry event.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::id::CommandId;

/// Priority hint used when the caller does not provide one.
pub const DEFAULT_PRIORITY: &str = "normal";

/// A control request: an open-ended action name plus free-form parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub action: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default = "default_priority", deserialize_with = "null_as_default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

/// An explicit `null` means the same as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_default_priority<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|priority| priority.unwrap_or_else(default_priority))
}

impl Command {
    /// A command with no parameters and the default priority.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            parameters: Map::new(),
            priority: default_priority(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Look up a parameter by key.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }
}

/// Acknowledgement that an upstream integration accepted a command.
///
/// Acceptance only means the upstream call succeeded, not that the
/// hardware reached the requested state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// Name of the adapter that handled the command.
    pub adapter: &'static str,
}

/// Dispatch status reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Accepted,
}

/// What the caller gets back from a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub command_id: CommandId,
    pub status: CommandStatus,
    pub message: String,
}

impl CommandOutcome {
    /// A fresh "accepted" outcome with a new correlation id.
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            command_id: CommandId::new(),
            status: CommandStatus::Accepted,
            message: "Command accepted for execution".to_string(),
        }
    }
}
