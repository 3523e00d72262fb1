//! API error taxonomy.
//!
//! Every failure a request can hit maps onto one of four variants; each
//! renders as the HTTP status plus a `{status, message}` JSON body. Errors
//! are request-scoped and non-fatal: a failing validation step or lookup
//! terminates that request's pipeline and nothing else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use ordering_store_interface::StoreError;

/// Result alias for handler and validator return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the API surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing, or invalid request field (400).
    #[error("{0}")]
    Validation(String),

    /// Id mismatch or illegal state transition/deletion (400).
    #[error("{0}")]
    Conflict(String),

    /// Unknown identifier (404).
    #[error("{entity} does not exist: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unexpected internal failure (500). The wire message is generic; the
    /// detail goes to the log only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a validation error (400).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a conflict error (400).
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a not-found error (404) for an entity and identifier.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create an internal error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error while handling request");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
