//! Integration tests for login and request admission.

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN, TestApp, VIEWER};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": ADMIN.0, "password": ADMIN.1 })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].as_str().is_some());
    assert_eq!(response.body["tokenType"], "Bearer");
    assert!(response.body["expiresAt"].as_str().is_some());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::new();

    let wrong = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": ADMIN.0, "password": "not-it" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "nobody", "password": "not-it" })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
}

#[tokio::test]
async fn test_blank_credentials_are_a_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized_with_challenge() {
    let app = TestApp::new();

    let response = app.request("GET", "/products", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers.get("www-authenticate").unwrap(), "Bearer");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/categories", None, Some("not.a.token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let app = TestApp::new();
    let token = app.viewer_token().await;

    let signature_start = token.rfind('.').unwrap() + 1;
    let mut tampered = token.into_bytes();
    tampered[signature_start] = if tampered[signature_start] == b'A' {
        b'B'
    } else {
        b'A'
    };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app
        .request("GET", "/categories", None, Some(&tampered))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_expires_after_ttl() {
    let app = TestApp::new();
    let token = app.viewer_token().await;
    let ttl = app.config.auth.token_ttl_minutes as i64;

    app.clock.advance(Duration::minutes(ttl) - Duration::seconds(1));
    let response = app.request("GET", "/categories", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    app.clock.advance(Duration::seconds(1));
    let response = app.request("GET", "/categories", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reader_may_read_but_not_write() {
    let app = TestApp::new();
    let token = app.viewer_token().await;

    let read = app.request("GET", "/products", None, Some(&token)).await;
    assert_eq!(read.status, StatusCode::OK);

    let write = app
        .request(
            "POST",
            "/categories",
            Some(json!({ "name": "Hardware" })),
            Some(&token),
        )
        .await;
    assert_eq!(write.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_anonymous_write_is_unauthorized_not_forbidden() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/categories", Some(json!({ "name": "Hardware" })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api-docs/openapi.json", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["info"]["title"], "Inventory Catalog API");
}

#[tokio::test]
async fn test_invalid_token_on_public_path_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": VIEWER.0, "password": VIEWER.1 })),
            Some("not.a.token"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_requires_authentication() {
    let app = TestApp::new();

    let anonymous = app.request("GET", "/nowhere", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let token = app.viewer_token().await;
    let known = app.request("GET", "/nowhere", None, Some(&token)).await;
    assert_eq!(known.status, StatusCode::NOT_FOUND);
}
