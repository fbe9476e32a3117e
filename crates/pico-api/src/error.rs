//! Error types for pico-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for pico-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pico-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from pico-storage
    #[error("Storage error: {0}")]
    Storage(#[from] pico_storage::Error),

    /// Request body could not be decoded as a list of blocks
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Invalid server configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Socket or file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors go back as plain text so the page can show them inline.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        let err = Error::BadRequest("expected array".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad request: expected array");
    }

    #[test]
    fn test_storage_error_is_server_error() {
        let err: Error = pico_storage::Error::io_with_path(
            std::io::Error::other("disk full"),
            "data.json",
        )
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_into_response_keeps_status() {
        let resp = Error::BadRequest("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
