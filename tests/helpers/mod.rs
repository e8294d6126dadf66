//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::Duration;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use leavedesk_api::{AppState, build_app, build_state};
use leavedesk_core::config::{AppConfig, StoreProvider};
use leavedesk_core::traits::ManualClock;
use leavedesk_database::Stores;
use leavedesk_entity::identity::{Identity, Role};

/// Password used for every identity the helpers create.
pub const PASSWORD: &str = "secret1";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock shared with every service
    pub clock: ManualClock,
    /// Services and stores behind the router
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.store.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let clock = ManualClock::default();
        let state = build_state(config, Arc::new(clock.clone()), Stores::memory());
        let router = build_app(state.clone());

        Self {
            router,
            clock,
            state,
        }
    }

    /// Move the shared clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Insert an identity directly.
    pub async fn create_identity(&self, role: Role, name: &str, email: &str) -> Identity {
        self.state
            .identity
            .create_identity(name, email, PASSWORD, role, "User already exists")
            .await
            .expect("Failed to create test identity")
    }

    /// Create an identity and return a bearer token for it.
    pub async fn token_for(&self, role: Role, name: &str, email: &str) -> String {
        self.create_identity(role, name, email).await;
        self.login(email, PASSWORD).await
    }

    /// Login and return the JWT
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Submit a leave request as `token`.
    pub async fn submit_leave(&self, token: &str, from: &str, to: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/leaves",
            Some(json!({
                "leave_type": "sick",
                "from_date": from,
                "to_date": to,
                "reason": "Seasonal flu",
            })),
            Some(token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of the body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
