mod common;

use axum::http::StatusCode;
use serde_json::json;
use shortli::domain::repositories::LinkRepository;
use shortli::utils::qr_code::{qr_target, render_png_data_uri};
use std::sync::Arc;

const C1: &str = "c1c1c1c1c1c1";
const C2: &str = "c2c2c2c2c2c2";

#[tokio::test]
async fn test_shorten_creates_link() {
    let app = common::create_test_state();
    let server = common::test_server(app.state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 12);
    assert_eq!(json["original_url"], "https://example.com/page");
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
}

#[tokio::test]
async fn test_shorten_is_idempotent_and_resolves_collisions() {
    let generator = common::TableGenerator::new(&[
        ("https://example.com/a", 0, C1),
        ("https://example.com/b", 0, C1),
        ("https://example.com/b", 1, C2),
    ]);
    let app = common::create_test_state_with(Some(Arc::new(generator)), 1000);
    let server = common::test_server(app.state);

    let first = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "example.com/a" }))
        .await;
    first.assert_status(StatusCode::CREATED);
    let first = first.json::<serde_json::Value>();
    assert_eq!(first["original_url"], "https://example.com/a");
    assert_eq!(first["short_code"], C1);

    let again = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "example.com/a" }))
        .await;
    again.assert_status_ok();
    assert_eq!(again.json::<serde_json::Value>()["short_code"], C1);

    let colliding = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "example.com/b" }))
        .await;
    colliding.assert_status(StatusCode::CREATED);
    let colliding = colliding.json::<serde_json::Value>();
    assert_eq!(colliding["original_url"], "https://example.com/b");
    assert_eq!(colliding["short_code"], C2);

    assert_eq!(app.repository.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_returns_qr_code_for_new_and_existing_links() {
    let app = common::create_test_state();
    let server = common::test_server(app.state);

    let created = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com/qr" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created = created.json::<serde_json::Value>();

    let short_url = created["short_url"].as_str().unwrap();
    let expected = render_png_data_uri(&qr_target(short_url)).unwrap();
    let qr = created["qr_code_base64"].as_str().unwrap();
    assert!(qr.starts_with("data:image/png;base64,"));
    assert_eq!(qr, expected);

    let existing = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com/qr" }))
        .await;
    existing.assert_status_ok();
    assert_eq!(existing.json::<serde_json::Value>()["qr_code_base64"], expected);
}

#[tokio::test]
async fn test_shorten_equivalent_urls_share_code() {
    let app = common::create_test_state();
    let server = common::test_server(app.state);

    let a = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "HTTPS://Example.COM:443/path#section" }))
        .await
        .json::<serde_json::Value>();
    let b = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com/path" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(a["short_code"], b["short_code"]);
    assert_eq!(b["original_url"], "https://example.com/path");
}

#[tokio::test]
async fn test_shorten_rejects_unsupported_scheme() {
    let app = common::create_test_state();
    let server = common::test_server(app.state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "javascript:alert(1)" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_rejects_empty_url() {
    let app = common::create_test_state();
    let server = common::test_server(app.state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(app.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_exhausted_budget_is_server_error() {
    // Every candidate for /c is held by /a.
    let generator = common::TableGenerator::new(
        &(0..10u32)
            .map(|salt| ("https://example.com/c", salt, C1))
            .chain(std::iter::once(("https://example.com/a", 0u32, C1)))
            .collect::<Vec<_>>(),
    );
    let app = common::create_test_state_with(Some(Arc::new(generator)), 1000);
    let server = common::test_server(app.state);

    server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com/c" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["details"]["attempts"], 10);
}
