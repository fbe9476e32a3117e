//! # pico-storage
//!
//! Storage backends for Pico.
//!
//! The whole persisted state is one ordered JSON array of blocks. This crate
//! provides:
//! - [`BlockStorage`], the load/save abstraction the server depends on
//! - [`FileStorage`], a single JSON file on disk (`data.json`)
//! - [`MemoryStorage`], an in-process store for tests and throwaway servers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod filesystem;
pub mod memory;
pub mod traits;

pub use error::{Error, Result};
pub use filesystem::FileStorage;
pub use memory::MemoryStorage;
pub use traits::BlockStorage;
