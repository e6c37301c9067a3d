//! Integration tests for Jaki.
//!
//! Tests drive the assembled axum router in-process with
//! `tower::ServiceExt::oneshot`, so no socket, data directory, or Printify
//! token is needed. Stores are in-memory and the catalog runs in mock mode.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p jaki-integration-tests
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use jaki_server::catalog::CatalogClient;
use jaki_server::config::{AdminConfig, ServerConfig};
use jaki_server::routes::create_router;
use jaki_server::state::{AppState, AppStateInner};
use jaki_server::store::{CartStore, PageStore};

/// Admin email the test config accepts.
pub const TEST_ADMIN_EMAIL: &str = "admin@jaki.test";

/// Admin password the test config accepts.
pub const TEST_ADMIN_PASSWORD: &str = "kR9#mZ2vQ8wX5nB1jL4pT7cF3dG6hY0a";

/// Configuration for in-process tests.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        base_url: "http://localhost:5000".to_string(),
        session_secret: SecretString::from("kR9#mZ2vQ8wX5nB1jL4pT7cF3dG6hY0a"),
        admin: AdminConfig {
            email: TEST_ADMIN_EMAIL.to_string(),
            password: SecretString::from(TEST_ADMIN_PASSWORD),
        },
        data_dir: PathBuf::from("unused"),
        printify_api_token: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Application state with in-memory stores and the mock catalog.
#[must_use]
pub fn test_state() -> AppState {
    Arc::new(AppStateInner {
        config: test_config(),
        pages: PageStore::in_memory(),
        carts: CartStore::in_memory(),
        catalog: CatalogClient::new(None),
    })
}

/// The full application router over fresh in-memory state.
#[must_use]
pub fn app() -> Router {
    create_router(test_state())
}

/// Send one request through the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible")
}

/// Build a JSON request, optionally carrying a session cookie.
#[must_use]
pub fn json_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Build a bodyless request, optionally carrying a session cookie.
#[must_use]
pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    builder.body(Body::empty()).expect("valid request")
}

/// Read a response body as JSON.
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Read a response body as text.
pub async fn read_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Log in as the test admin and return the session cookie pair.
///
/// # Panics
///
/// Panics when login fails; tests treat that as a setup error.
pub async fn login(app: &Router) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &serde_json::json!({
                "email": TEST_ADMIN_EMAIL,
                "password": TEST_ADMIN_PASSWORD,
            }),
        ),
    )
    .await;
    assert!(
        response.status().is_success(),
        "login failed: {}",
        response.status()
    );

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .expect("ascii cookie");

    // Keep only the name=value pair for replay
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}
