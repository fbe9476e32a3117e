//! API server implementation

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use pico_storage::BlockStorage;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::routes::{self, AppState};
use crate::Result;

/// Pico HTTP server
pub struct Server {
    config: ServerConfig,
    storage: Arc<dyn BlockStorage>,
}

impl Server {
    /// Create a server over the given storage.
    pub fn new(config: ServerConfig, storage: Arc<dyn BlockStorage>) -> Self {
        Self { config, storage }
    }

    /// The server's configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router: `/`, `/data`, and `/static/*`.
    pub fn router(&self) -> Router {
        let state = AppState {
            storage: self.storage.clone(),
            static_dir: self.config.static_dir.clone(),
        };

        Router::new()
            .route("/", get(routes::index))
            .route("/data", get(routes::get_data).post(routes::save_data))
            .nest_service("/static", ServeDir::new(&self.config.static_dir))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.config.request_timeout(),
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(
            addr = %listener.local_addr()?,
            storage = %self.storage.describe(),
            "Pico listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("Pico stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
