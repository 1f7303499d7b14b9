mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::InMemoryUrlRepository;
use quorum_shortener::api::handlers::shorten_handler;
use quorum_shortener::utils::key_deriver::derive_short_key;
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn server(repo: Arc<InMemoryUrlRepository>) -> TestServer {
    let app = Router::new()
        .route("/shorten", get(shorten_handler))
        .with_state(common::create_test_state(repo));

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = server(repo.clone());

    let long_url = "https://example.com/a/very/long/path";
    let response = server
        .get("/shorten")
        .add_query_param("long_url", long_url)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["short_url"],
        format!("{}/{}", common::BASE_URL, derive_short_key(long_url))
    );
    assert_eq!(repo.insert_count(), 1);
}

#[tokio::test]
async fn test_shorten_twice_inserts_once() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = server(repo.clone());

    let first = server
        .get("/shorten")
        .add_query_param("long_url", "https://example.com")
        .await;
    let second = server
        .get("/shorten")
        .add_query_param("long_url", "https://example.com")
        .await;

    first.assert_status_ok();
    second.assert_status_ok();

    assert_eq!(
        first.json::<serde_json::Value>()["short_url"],
        second.json::<serde_json::Value>()["short_url"]
    );
    assert_eq!(repo.insert_count(), 1);
    assert_eq!(repo.long_url_lookups.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_shorten_returns_existing_key() {
    let repo = Arc::new(InMemoryUrlRepository::with_mapping(
        "legacy1",
        "https://example.com",
    ));
    let server = server(repo.clone());

    let response = server
        .get("/shorten")
        .add_query_param("long_url", "https://example.com")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["short_url"],
        "http://localhost:8080/legacy1"
    );
    assert_eq!(repo.insert_count(), 0);
}

#[tokio::test]
async fn test_shorten_missing_param() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = server(repo.clone());

    let response = server.get("/shorten").await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Missing 'long_url' parameter");
    assert_eq!(repo.long_url_lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_shorten_empty_param() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = server(repo);

    let response = server.get("/shorten").add_query_param("long_url", "").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_does_not_require_valid_url() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = server(repo.clone());

    let response = server
        .get("/shorten")
        .add_query_param("long_url", "not a url")
        .await;

    response.assert_status_ok();
    assert_eq!(repo.insert_count(), 1);
}

#[tokio::test]
async fn test_shorten_lookup_failure() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    repo.fail_reads.store(true, Ordering::SeqCst);
    let server = server(repo.clone());

    let response = server
        .get("/shorten")
        .add_query_param("long_url", "https://example.com")
        .await;

    assert_eq!(response.status_code(), 500);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["message"], "Error checking URL");
    assert_eq!(repo.insert_count(), 0);
}

#[tokio::test]
async fn test_shorten_write_failure() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    repo.fail_writes.store(true, Ordering::SeqCst);
    let server = server(repo.clone());

    let response = server
        .get("/shorten")
        .add_query_param("long_url", "https://example.com")
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "Error saving URL to database"
    );
    assert_eq!(repo.insert_count(), 1);
    assert_eq!(repo.row_count(), 0);
}
