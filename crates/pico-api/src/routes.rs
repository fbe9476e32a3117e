//! Request handlers.
//!
//! `POST /data` reads the raw body rather than using the `Json` extractor:
//! the page posts `JSON.stringify(...)` without a content type.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use pico_core::{Block, decode_blocks};
use pico_storage::BlockStorage;

use crate::{Error, Result};

/// The page served at `/` when the static directory has no `index.html`.
pub const BUNDLED_INDEX: &str = include_str!("../assets/index.html");

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Where blocks live.
    pub storage: Arc<dyn BlockStorage>,
    /// Directory checked for an `index.html` override.
    pub static_dir: PathBuf,
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let override_path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&override_path).await {
        Ok(page) => Html(page),
        Err(_) => Html(BUNDLED_INDEX.to_string()),
    }
}

/// `GET /data`
pub async fn get_data(State(state): State<AppState>) -> Result<Json<Vec<Block>>> {
    let blocks = state.storage.load().await?;
    tracing::debug!(count = blocks.len(), "Serving blocks");
    Ok(Json(blocks))
}

/// `POST /data`
pub async fn save_data(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let blocks = decode_blocks(&body).map_err(|e| Error::BadRequest(e.to_string()))?;
    state.storage.save(&blocks).await?;
    tracing::info!(count = blocks.len(), "Saved blocks");
    Ok(StatusCode::OK)
}
