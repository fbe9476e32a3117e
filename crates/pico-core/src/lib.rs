//! # pico-core
//!
//! The block model shared by every Pico crate.
//!
//! # Modules
//!
//! - [`block`]: The `Block` record and its JSON form
//! - [`list`]: `BlockList`, the editable ordered collection and its change feed
//! - [`display`]: Date formatting, relative timestamps, time-of-day theme
//! - [`ids`]: Editor row identifiers
//! - [`error`]: Error types and Result alias

pub mod block;
pub mod display;
pub mod error;
pub mod ids;
pub mod list;

mod proptests;

// Re-export key types at crate root for convenience
pub use block::{Block, BlockPatch, decode_blocks, encode_blocks};
pub use display::{Theme, format_date, relative_time};
pub use error::{Error, Result};
pub use ids::RowId;
pub use list::{BlockList, Row};
