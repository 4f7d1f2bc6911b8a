//! Error taxonomy shared across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DevHubError`]
//! via `From`. The HTTP adapter maps every variant to a stable status
//! category; nothing below that layer knows about status codes.

use std::error::Error as StdError;

/// Top-level error returned by every port and use-case.
#[derive(Debug, thiserror::Error)]
pub enum DevHubError {
    /// A request or record broke a domain invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// The operation is not allowed given the record's current status.
    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    /// The action or its parameters do not fit the device family.
    #[error("unsupported command: {0}")]
    UnsupportedCommand(#[from] UnsupportedCommandError),

    /// An upstream service could not be reached or timed out.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(#[from] ServiceUnavailableError),

    /// An upstream service answered but rejected the call.
    #[error("dispatch failed: {0}")]
    DispatchFailed(#[from] DispatchFailedError),

    /// The registry (or another internal collaborator) failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("no fields to update")]
    EmptyUpdate,
}

#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
#[error("device {device_id} is not active (status: {status})")]
pub struct InvalidStateError {
    pub device_id: String,
    pub status: String,
}

/// Why a command was refused by an adapter before any upstream call.
#[derive(Debug, thiserror::Error)]
#[error("{action:?} is not supported for {family} devices: {reason}")]
pub struct UnsupportedCommandError {
    pub family: &'static str,
    pub action: String,
    pub reason: &'static str,
}

#[derive(Debug, thiserror::Error)]
#[error("{service} is unavailable")]
pub struct ServiceUnavailableError {
    pub service: &'static str,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

#[derive(Debug, thiserror::Error)]
#[error("{service} rejected the call: {detail}")]
pub struct DispatchFailedError {
    pub service: &'static str,
    pub detail: String,
}

impl DevHubError {
    /// Wrap any error as an internal storage failure.
    pub fn storage(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}
