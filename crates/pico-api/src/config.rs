//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Directory served under `/static/`; an `index.html` here replaces the
    /// bundled page.
    pub static_dir: PathBuf,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Largest accepted `POST /data` body.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9110,
            static_dir: PathBuf::from("./static"),
            request_timeout_secs: 60,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// The socket address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid listen address: {e}")))
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
