//! Upstream-specific error type wrapping reqwest errors.

use devhub_domain::error::{DevHubError, DispatchFailedError, ServiceUnavailableError};

/// Errors originating from an upstream HTTP call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// Connection failed or the call timed out.
    #[error("{service} could not be reached")]
    Unreachable {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{service} answered with status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    /// A success answer carried a body that could not be decoded.
    #[error("{service} sent an unreadable response")]
    Body {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub(crate) fn unreachable(service: &'static str, source: reqwest::Error) -> Self {
        Self::Unreachable { service, source }
    }

    /// A body read that timed out is still an availability problem.
    pub(crate) fn body(service: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Unreachable { service, source }
        } else {
            Self::Body { service, source }
        }
    }
}

impl From<UpstreamError> for DevHubError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unreachable { service, source } => ServiceUnavailableError {
                service,
                source: Box::new(source),
            }
            .into(),
            UpstreamError::Status { service, status } => DispatchFailedError {
                service,
                detail: format!("status {status}"),
            }
            .into(),
            UpstreamError::Body { service, source } => DispatchFailedError {
                service,
                detail: format!("unreadable response: {source}"),
            }
            .into(),
            err @ UpstreamError::Client(_) => DevHubError::storage(err),
        }
    }
}
