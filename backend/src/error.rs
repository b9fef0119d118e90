//! Error types for the development server.
//!
//! - [`StoreError`] - record store persistence errors
//! - [`ServerError`] - HTTP-facing errors, rendered as `{"error": "..."}`
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::api::types::ErrorBody;

// =============================================================================
// Store Errors
// =============================================================================

/// Errors reading or writing the on-disk snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("Store IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error.
    #[error("Store JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Snapshot references an image that is not on disk.
    #[error("Missing image file: {0}")]
    MissingImage(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Required fields empty or absent.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Unknown resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Background task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(String),

    /// Listener / IO error.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) | ServerError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Store(_) | ServerError::Task(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let store_err: StoreError = io.into();
        let server_err: ServerError = store_err.into();
        assert!(server_err.to_string().contains("disk full"));
        assert_eq!(server_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_fields_format() {
        let err = ServerError::MissingFields(vec!["name", "image"]);
        assert_eq!(err.to_string(), "Missing required fields: name, image");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
