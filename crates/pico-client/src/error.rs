//! Error types for pico-client

use thiserror::Error;

/// Result type alias for pico-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pico-client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as the server sent it
        message: String,
    },

    /// Base URL is not usable
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The autosave task is no longer running
    #[error("Autosaver has stopped")]
    AutosaverStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = Error::Status {
            status: 500,
            message: "Storage error: disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 500: Storage error: disk full");
    }

    #[test]
    fn test_invalid_url_display() {
        let err = Error::InvalidUrl("ftp://x".to_string());
        assert_eq!(err.to_string(), "Invalid server URL: ftp://x");
    }
}
