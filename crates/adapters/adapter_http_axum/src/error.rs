//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use devhub_domain::error::DevHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Maps [`DevHubError`] (and malformed request bodies) to an HTTP
/// response with the appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    Domain(DevHubError),
    BadRequest(String),
}

impl From<DevHubError> for ApiError {
    fn from(err: DevHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

fn status_and_message(err: &DevHubError) -> (StatusCode, String) {
    match err {
        DevHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        DevHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        DevHubError::InvalidState(err) => (StatusCode::CONFLICT, err.to_string()),
        DevHubError::UnsupportedCommand(err) => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        DevHubError::DispatchFailed(err) => {
            tracing::warn!(error = %err, "upstream rejected the call");
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
        DevHubError::ServiceUnavailable(err) => {
            tracing::warn!(error = %err, source = ?std::error::Error::source(err), "upstream unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
        DevHubError::Storage(err) => {
            tracing::error!(error = %err, "storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Domain(err) => status_and_message(err),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}
