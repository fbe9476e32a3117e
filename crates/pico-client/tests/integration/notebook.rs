//! Notebook editing with autosave against a live server.

use std::time::Duration;

use pico_client::{Notebook, SaveStatus};
use pico_core::Block;
use pico_storage::BlockStorage;

use crate::common::TestServer;

const SHORT_DELAY: Duration = Duration::from_millis(50);

#[tokio::test]
async fn test_opening_does_not_save() {
    let server = TestServer::start().await;
    server
        .storage
        .save(&[Block::new("existing", "")])
        .await
        .expect("seed");

    let notebook = Notebook::open(server.client(), SHORT_DELAY)
        .await
        .expect("open");
    assert_eq!(notebook.list().len(), 1);
    assert_eq!(notebook.status(), SaveStatus::Idle);

    assert_eq!(notebook.close().await, SaveStatus::Idle);
    server.stop().await;
}

#[tokio::test]
async fn test_edits_are_autosaved() {
    let server = TestServer::start().await;
    let mut notebook = Notebook::open(server.client(), SHORT_DELAY)
        .await
        .expect("open");
    let mut status = notebook.status();
    assert_eq!(status, SaveStatus::Idle);

    let id = notebook.list_mut().create(Block::empty());
    notebook.list_mut().set_heading(id, "Groceries").expect("heading");
    notebook.list_mut().set_body(id, "milk").expect("body");

    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        status = notebook.status();
        if matches!(status, SaveStatus::Saved { .. }) {
            break;
        }
    }
    assert!(matches!(status, SaveStatus::Saved { .. }), "status: {status}");
    assert_eq!(
        server.storage.load().await.expect("load"),
        vec![Block::new("Groceries", "milk")]
    );

    notebook.close().await;
    server.stop().await;
}

#[tokio::test]
async fn test_close_saves_pending_edits() {
    let server = TestServer::start().await;
    let mut notebook = Notebook::open(server.client(), Duration::from_secs(60))
        .await
        .expect("open");

    notebook.list_mut().create(Block::new("saved on close", ""));
    let status = notebook.close().await;

    assert!(matches!(status, SaveStatus::Saved { .. }), "status: {status}");
    assert_eq!(
        server.storage.load().await.expect("load"),
        vec![Block::new("saved on close", "")]
    );
    server.stop().await;
}

#[tokio::test]
async fn test_failed_save_is_reported_inline() {
    let server = TestServer::start().await;
    let mut notebook = Notebook::open(server.client(), Duration::from_secs(60))
        .await
        .expect("open");
    let base_url = server.base_url.clone();
    server.stop().await;

    notebook.list_mut().create(Block::new("lost", ""));
    notebook.flush().await.expect("flush");

    let SaveStatus::Failed(message) = notebook.status() else {
        unreachable!("expected failure after server stopped");
    };
    assert!(message.starts_with("HTTP error"), "message: {message} ({base_url})");
    notebook.close().await;
}
