//! Error types for pico-core

use thiserror::Error;

/// Result type alias for pico-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pico-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No row with this id exists in the list
    #[error("Row not found: {id}")]
    RowNotFound {
        /// Row id that was not found
        id: String,
    },

    /// Positional lookup past the end of the list
    #[error("Index {index} out of range (list has {len} blocks)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current list length
        len: usize,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a row-not-found error.
    pub fn row_not_found(id: impl ToString) -> Self {
        Error::RowNotFound { id: id.to_string() }
    }
}
