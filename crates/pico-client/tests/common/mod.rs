//! Common test harness: a Pico server on an ephemeral port.

use std::path::PathBuf;
use std::sync::Arc;

use pico_api::{Server, ServerConfig};
use pico_client::PicoClient;
use pico_storage::{BlockStorage, FileStorage};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running server backed by a data file in a temp directory.
pub struct TestServer {
    /// Base URL of the running server.
    pub base_url: String,
    /// Storage the server writes to.
    pub storage: Arc<FileStorage>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    _dir: TempDir,
}

impl TestServer {
    /// Starts a server over an empty data file.
    pub async fn start() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let storage = Arc::new(
            FileStorage::open(dir.path().join("data.json"))
                .await
                .expect("open storage"),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let config = ServerConfig {
            static_dir: dir.path().join("static"),
            ..Default::default()
        };
        let server = Server::new(config, storage.clone() as Arc<dyn BlockStorage>);
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .serve_on(listener, async {
                    let _ = rx.await;
                })
                .await
                .expect("server run");
        });

        Self {
            base_url: format!("http://{addr}"),
            storage,
            shutdown: Some(tx),
            handle: Some(handle),
            _dir: dir,
        }
    }

    /// A client pointed at this server.
    pub fn client(&self) -> PicoClient {
        PicoClient::new(&self.base_url).expect("client")
    }

    /// Path of the backing data file.
    pub fn data_path(&self) -> PathBuf {
        self.storage.path().to_path_buf()
    }

    /// Stops the server and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.expect("server task");
        }
    }
}
