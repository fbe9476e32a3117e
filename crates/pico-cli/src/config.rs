//! Configuration file for the `pico` command.
//!
//! Resolution order for the file: `--config` / `PICO_CONFIG`, then
//! `<config dir>/pico/config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pico_api::ServerConfig;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name used for the config directory and in messages.
pub const PROJECT_NAME: &str = "pico";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PicoConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Where the server keeps blocks.
    pub storage: StorageConfig,
    /// Settings for client commands.
    pub client: ClientConfig,
    /// Logging.
    pub log: LogConfig,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON data file.
    pub data_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(pico_storage::filesystem::DEFAULT_DATA_PATH),
        }
    }
}

/// Client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL.
    pub base_url: String,
    /// Quiet period before an edit is saved, in milliseconds.
    pub autosave_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: pico_client::DEFAULT_BASE_URL.to_string(),
            autosave_delay_ms: pico_client::DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

impl ClientConfig {
    /// Autosave delay as a duration.
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl PicoConfig {
    /// Default config file location for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, else the platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load configuration; a missing file yields defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
