//! Error types for pico-storage

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for pico-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pico-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from pico-core
    #[error("Core error: {0}")]
    Core(#[from] pico_core::Error),

    /// I/O failure on the data file
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The data file does not hold a JSON array of blocks
    #[error("Corrupt data file {path}: {source}")]
    Corrupt {
        /// File that failed to parse
        path: PathBuf,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            "/tmp/data.json",
        );
        assert_eq!(err.to_string(), "I/O error on /tmp/data.json: denied");
    }

    #[test]
    fn test_serialization_error_converts_through_core() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: Error = pico_core::Error::from(json_err).into();
        assert!(matches!(err, Error::Core(pico_core::Error::Serialization(_))));
        assert!(err.to_string().starts_with("Core error: Serialization error"));
    }
}
