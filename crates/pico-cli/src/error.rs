//! Error types for pico-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for pico-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pico-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from pico-core
    #[error("Core error: {0}")]
    Core(#[from] pico_core::Error),

    /// Error from pico-storage
    #[error("Storage error: {0}")]
    Storage(#[from] pico_storage::Error),

    /// Error from pico-api
    #[error("Server error: {0}")]
    Api(#[from] pico_api::Error),

    /// Error from pico-client
    #[error("Client error: {0}")]
    Client(#[from] pico_client::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A command was given arguments it cannot use
    #[error("{0}")]
    Usage(String),

    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Terminal I/O error
    #[error("Terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage<S: Into<String>>(message: S) -> Self {
        Error::Usage(message.into())
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
