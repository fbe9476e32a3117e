//! Fetch/save round trips against a live server.

use pico_client::{Error, PicoClient};
use pico_core::Block;
use pico_storage::BlockStorage;

use crate::common::TestServer;

#[tokio::test]
async fn test_fresh_server_has_no_blocks() {
    let server = TestServer::start().await;
    let blocks = server.client().fetch().await.expect("fetch");
    assert!(blocks.is_empty());
    server.stop().await;
}

#[tokio::test]
async fn test_save_then_fetch_round_trips() {
    let server = TestServer::start().await;
    let client = server.client();
    let blocks = vec![
        Block::new("Monday", "standup\nreview PR\n"),
        Block::new("", ""),
        Block::new("Ideas", "unicode ✓ and \"quotes\""),
    ];

    client.save(&blocks).await.expect("save");
    assert_eq!(client.fetch().await.expect("fetch"), blocks);
    assert_eq!(server.storage.load().await.expect("load"), blocks);

    server.stop().await;
}

#[tokio::test]
async fn test_save_persists_to_disk() {
    let server = TestServer::start().await;
    server
        .client()
        .save(&[Block::new("on disk", "yes")])
        .await
        .expect("save");

    let raw = std::fs::read_to_string(server.data_path()).expect("read data file");
    let parsed: Vec<Block> = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(parsed, vec![Block::new("on disk", "yes")]);

    server.stop().await;
}

#[tokio::test]
async fn test_server_error_surfaces_as_status() {
    let server = TestServer::start().await;
    std::fs::write(server.data_path(), "garbage").expect("corrupt file");

    let err = server.client().fetch().await.expect_err("fetch should fail");
    let Error::Status { status, message } = err else {
        unreachable!("Expected Status error, got {err:?}");
    };
    assert_eq!(status, 500);
    assert!(message.contains("Corrupt data file"));

    server.stop().await;
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let server = TestServer::start().await;
    let base_url = server.base_url.clone();
    server.stop().await;

    let client = PicoClient::new(base_url).expect("client");
    let err = client.fetch().await.expect_err("nothing listening");
    assert!(matches!(err, Error::Http(_)));
}
