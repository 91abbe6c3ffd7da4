mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_requests_over_limit_are_rejected() {
    let app = common::create_test_state_with(None, 3);
    let server = common::test_server(app.state);

    for _ in 0..3 {
        server
            .get("/")
            .add_header("X-Forwarded-For", "203.0.113.7")
            .await
            .assert_status_ok();
    }

    let response = server
        .get("/")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "rate_limited");
    assert_eq!(json["error"]["details"]["limit"], 3);
}

#[tokio::test]
async fn test_clients_are_limited_independently() {
    let app = common::create_test_state_with(None, 1);
    let server = common::test_server(app.state);

    server
        .get("/")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .await
        .assert_status_ok();
    server
        .get("/")
        .add_header("X-Forwarded-For", "203.0.113.2, 10.0.0.1")
        .await
        .assert_status_ok();
    server
        .get("/")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_limit_applies_across_api_routes() {
    let app = common::create_test_state_with(None, 2);
    let server = common::test_server(app.state);

    server
        .get("/api/stats")
        .add_header("X-Real-IP", "198.51.100.4")
        .await
        .assert_status_ok();
    server
        .get("/ffffffffffff")
        .add_header("X-Real-IP", "198.51.100.4")
        .await
        .assert_status_not_found();
    server
        .delete("/api/urls/ffffffffffff")
        .add_header("X-Real-IP", "198.51.100.4")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_peer_address_is_used_without_proxy_headers() {
    let app = common::create_test_state_with(None, 1);
    let admission = app.state.admission.clone();
    let server = common::test_server_from_peer(app.state, "192.0.2.10:54321");

    server.get("/").await.assert_status_ok();
    server
        .get("/")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    assert_eq!(admission.recorded("192.0.2.10"), 1);
}
