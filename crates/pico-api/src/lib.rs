//! # pico-api
//!
//! HTTP server for Pico.
//!
//! Endpoints:
//! - `GET /`: the notebook page
//! - `GET /data`: the stored blocks as a JSON array of `{h, b}`
//! - `POST /data`: replace the stored blocks with the posted array
//! - `GET /static/*`: files from the configured static directory
//!
//! Failures come back as plain-text bodies so the page can show them inline.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use server::Server;
