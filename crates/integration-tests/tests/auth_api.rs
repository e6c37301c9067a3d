//! Integration tests for admin session auth.

use axum::http::{StatusCode, header};
use serde_json::json;

use jaki_integration_tests::{
    TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD, app, get_request, json_request, login, read_json, send,
};

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": TEST_ADMIN_EMAIL, "password": "wrong"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": "someone@else.test", "password": TEST_ADMIN_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": TEST_ADMIN_EMAIL, "password": TEST_ADMIN_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header");
    assert!(set_cookie.starts_with("jaki_session="));
    assert!(set_cookie.contains("HttpOnly"));

    let body = read_json(response).await;
    assert_eq!(body["email"], TEST_ADMIN_EMAIL);
}

#[tokio::test]
async fn test_me_reflects_session_lifecycle() {
    let app = app();

    // No session yet
    let response = send(&app, get_request("/api/auth/me", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"authenticated": false}));

    let cookie = login(&app).await;

    let response = send(&app, get_request("/api/auth/me", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["email"], TEST_ADMIN_EMAIL);

    // Logout invalidates the session server-side
    let response = send(
        &app,
        json_request("POST", "/api/auth/logout", Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get_request("/api/auth/me", Some(&cookie))).await;
    assert_eq!(read_json(response).await, json!({"authenticated": false}));
}
