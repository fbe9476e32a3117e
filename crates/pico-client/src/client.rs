//! Pico client implementation

use std::time::Duration;

use async_trait::async_trait;
use pico_core::Block;

use crate::autosave::SaveTarget;
use crate::{Error, Result};

/// Default server address, matching the server's default bind.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9110";

/// Client for the two Pico endpoints.
#[derive(Debug, Clone)]
pub struct PicoClient {
    http: reqwest::Client,
    base_url: String,
}

impl PicoClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(60))
    }

    /// Create a client with a per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::InvalidUrl(base_url));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Server base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn data_url(&self) -> String {
        format!("{}/data", self.base_url)
    }

    /// `GET /data`
    pub async fn fetch(&self) -> Result<Vec<Block>> {
        let resp = self.http.get(self.data_url()).send().await?;
        let resp = check_status(resp).await?;
        let blocks: Vec<Block> = resp.json().await?;
        tracing::debug!(count = blocks.len(), "Fetched blocks");
        Ok(blocks)
    }

    /// `POST /data`
    pub async fn save(&self, blocks: &[Block]) -> Result<()> {
        let resp = self.http.post(self.data_url()).json(blocks).send().await?;
        check_status(resp).await?;
        tracing::debug!(count = blocks.len(), "Saved blocks");
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SaveTarget for PicoClient {
    async fn save_blocks(&self, blocks: &[Block]) -> Result<()> {
        self.save(blocks).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = PicoClient::new("http://localhost:9110/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9110");
        assert_eq!(client.data_url(), "http://localhost:9110/data");
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(matches!(
            PicoClient::new("localhost:9110"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
