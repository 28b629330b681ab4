//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{TimeZone, Utc};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use inventory_auth::PasswordHasher;
use inventory_core::config::{AccountConfig, AppConfig};
use inventory_core::traits::{Clock, ManualClock};
use inventory_database::CatalogStores;

pub const ADMIN: (&str, &str) = ("admin", "admin-password");
pub const VIEWER: (&str, &str) = ("viewer", "viewer-password");

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock shared with the token codec
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over empty in-memory stores.
    pub fn new() -> Self {
        let hasher = PasswordHasher::with_cost(64, 1).expect("test hasher");

        let account = |(username, password): (&str, &str), role: &str| AccountConfig {
            username: username.to_string(),
            password_hash: hasher.hash_password(password).expect("hash"),
            roles: vec![role.to_string()],
        };

        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-signing-secret-0123456789".to_string();
        config.auth.token_ttl_minutes = 60;
        config.auth.accounts = vec![account(ADMIN, "FULL"), account(VIEWER, "READER")];

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        ));
        let state = inventory_api::build_state(
            config.clone(),
            CatalogStores::in_memory(),
            clock.clone() as Arc<dyn Clock>,
            hasher.clone(),
        )
        .expect("Failed to build state");

        Self {
            router: inventory_api::build_app(state),
            clock,
            config,
        }
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, (username, password): (&str, &str)) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN).await
    }

    pub async fn viewer_token(&self) -> String {
        self.login(VIEWER).await
    }

    /// Create a category as admin and return its JSON.
    pub async fn create_category(&self, token: &str, name: &str) -> Value {
        let response = self
            .request("POST", "/categories", Some(json!({ "name": name })), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }

    /// Create a product as admin and return its JSON.
    pub async fn create_product(
        &self,
        token: &str,
        name: &str,
        price: f64,
        category_id: i64,
    ) -> Value {
        let response = self
            .request(
                "POST",
                "/products",
                Some(json!({
                    "name": name,
                    "price": price,
                    "quantity": 5,
                    "categoryId": category_id,
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("serialize body"))),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}
