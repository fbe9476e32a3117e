//! Row identifiers for blocks held in a [`BlockList`](crate::BlockList).

use std::fmt;
use uuid::Uuid;

/// Stable identity for a row in the editor.
///
/// Not persisted: the stored JSON is a plain array, so rows get fresh ids
/// every time a list is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    /// Creates a new random row ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
