//! Error types for the HTTP API.
//!
//! [`ApiError`] is what every handler returns on failure. Its
//! [`IntoResponse`] implementation renders `{error, message, status}` with
//! the matching status code. Service failures convert through
//! `From<ServiceError>`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::ServiceError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("{0}")]
    NotFound(String),

    /// The request was malformed or rejected by a service.
    #[error("{0}")]
    BadRequest(String),

    /// The request body failed field validation.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The request body was not valid JSON for the endpoint.
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// The algorithm did not finish within its budget.
    #[error("{0}")]
    Timeout(String),

    /// An internal error occurred.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for the error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        let message = error.to_string();
        match error {
            ServiceError::AlgorithmNotFound { .. }
            | ServiceError::SessionNotFound { .. }
            | ServiceError::StepNotFound { .. }
            | ServiceError::TestNotFound { .. } => Self::NotFound(message),
            ServiceError::Algorithm(_)
            | ServiceError::InvalidStepId { .. }
            | ServiceError::InvalidAlgorithm { .. }
            | ServiceError::DataSizeTooLarge { .. }
            | ServiceError::UnsupportedDataType { .. }
            | ServiceError::InvalidPattern { .. }
            | ServiceError::NotEnoughTests { .. } => Self::BadRequest(message),
            ServiceError::ExecutionTimeout { .. } => Self::Timeout(message),
            ServiceError::Internal(_) => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("error"),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (
                ServiceError::SessionNotFound { id: "x".to_owned() },
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::InvalidStepId { raw: "x".to_owned() },
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::ExecutionTimeout { secs: 1 },
                StatusCode::REQUEST_TIMEOUT,
            ),
            (
                ServiceError::Internal("boom".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn message_is_the_service_message() {
        let error = ApiError::from(ServiceError::TestNotFound {
            id: "abc".to_owned(),
        });
        assert_eq!(error.to_string(), "benchmark test not found: abc");
    }
}
