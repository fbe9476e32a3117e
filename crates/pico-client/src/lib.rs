//! # pico-client
//!
//! Rust client for the Pico server.
//!
//! This crate provides:
//! - [`PicoClient`], the `GET /data` / `POST /data` pair
//! - [`Autosaver`], the debounced save loop bound to a block list
//! - [`Notebook`], a fetched list with autosave already wired up

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod autosave;
pub mod client;
pub mod error;
pub mod notebook;

pub use autosave::{Autosaver, DEFAULT_DELAY, SaveStatus, SaveTarget};
pub use client::{DEFAULT_BASE_URL, PicoClient};
pub use error::{Error, Result};
pub use notebook::Notebook;
