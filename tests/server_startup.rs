//! Server Startup Tests
//!
//! Tests for server lifecycle, configuration loading, and startup behavior.
//! These tests verify that the server can start correctly under various conditions.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{Router, body::Body, http::Request};
use http_body_util::BodyExt;
use tokio::time::timeout;
use tower::util::ServiceExt;
use url::Url;

use voicelab::{ServerConfig, routes, state::AppState};

/// Helper function to create a minimal test configuration
fn create_minimal_config(port: u16) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
        provider_base_url: Url::parse("http://127.0.0.1:9").unwrap(),
        session_idle_timeout_seconds: 60,
        max_sessions: 10,
    }
}

/// Test that the server can start with minimal configuration
#[tokio::test]
async fn test_minimal_config_boot() {
    let app_state = AppState::new(create_minimal_config(0));

    // Create a minimal router with health check
    let app = Router::new()
        .route(
            "/",
            axum::routing::get(voicelab::handlers::api::health_check),
        )
        .with_state(app_state);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

/// Test that the health check body and route are wired into the full router
#[tokio::test]
async fn test_health_check_route() {
    let app_state = AppState::new(create_minimal_config(0));
    let app = routes::build_router(app_state);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    // Health check runs outside the session middleware
    assert!(response.headers().get("set-cookie").is_none());

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "OK");
}

/// Test that unknown routes are not served
#[tokio::test]
async fn test_unknown_route_not_found() {
    let app = routes::build_router(AppState::new(create_minimal_config(0)));

    let request = Request::builder()
        .uri("/v1/voices")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

/// Test that the configured address is what the listener binds
#[tokio::test]
async fn test_address_is_bindable() {
    let config = create_minimal_config(0);

    let address: SocketAddr = config.address().parse().unwrap();
    assert_eq!(address.ip().to_string(), "127.0.0.1");

    let listener = tokio::net::TcpListener::bind(address).await.unwrap();
    assert_ne!(listener.local_addr().unwrap().port(), 0);
}

/// Test that session settings are carried into the store
#[tokio::test]
async fn test_session_configuration() {
    let mut config = create_minimal_config(0);
    config.session_idle_timeout_seconds = 5;
    config.max_sessions = 3;

    let app_state = AppState::new(config);

    assert_eq!(app_state.config.session_idle_timeout(), Duration::from_secs(5));
    assert_eq!(app_state.config.max_sessions, 3);
    assert_eq!(app_state.sessions.entry_count(), 0);
}

/// Test that the server really serves over TCP
#[tokio::test]
async fn test_serves_over_tcp() {
    let app = routes::build_router(AppState::new(create_minimal_config(0)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let response = timeout(
        Duration::from_secs(5),
        reqwest::get(format!("http://{}/", addr)),
    )
    .await
    .expect("request timed out")
    .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(
        response
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .starts_with("voicelab_session=")
    );
    let body = response.text().await.unwrap();
    assert!(body.contains("Voice Lab"));

    server.abort();
}

/// Test that a session cookie is only honoured by the server that issued it
#[tokio::test]
async fn test_sessions_do_not_survive_restart() {
    let first = routes::build_router(AppState::new(create_minimal_config(0)));
    let response = first
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let restarted = routes::build_router(AppState::new(create_minimal_config(0)));
    let response = restarted
        .oneshot(
            Request::builder()
                .uri("/")
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let reissued = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(reissued.starts_with("voicelab_session="));
    assert!(!reissued.starts_with(&cookie));
}
