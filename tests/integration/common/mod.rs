//! Common test utilities and fixtures for integration tests
//!
//! Builds the full application router over in-memory stores, so no database
//! is needed. Sessions are minted with the same backend the router uses.

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{header::COOKIE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use solosphere_app::{create_app, Stores};
use solosphere_auth::{AuthBackend, AuthConfig, IdentityClaims};
use solosphere_common::Config;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_only"; // pragma: allowlist secret

/// Test application over in-memory stores
pub struct TestApp {
    pub router: Router,
    pub stores: Stores,
    pub auth: AuthBackend,
    pub config: Config,
}

impl TestApp {
    /// Application with reference authorization behavior
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Application with `STRICT_OWNERSHIP=true`
    pub fn strict() -> Self {
        Self::with_env(&[("STRICT_OWNERSHIP", "true")])
    }

    /// Application configured from the given variables on top of the test defaults
    pub fn with_env(overrides: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = [
            ("ACCESS_TOKEN_SECRET", TEST_SECRET),
            ("STORE_PROVIDER", "memory"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (key, value) in overrides {
            vars.insert(key.to_string(), value.to_string());
        }

        let config = Config::from_lookup(|key| vars.get(key).cloned())
            .expect("test configuration should be valid");
        let stores = Stores::memory();
        let router = create_app(&config, &stores);
        let auth = AuthBackend::new(AuthConfig::from_config(&config));

        Self {
            router,
            stores,
            auth,
            config,
        }
    }

    /// `Cookie` header value carrying a valid session for `email`
    pub fn session_cookie(&self, email: &str) -> String {
        let token = self
            .auth
            .tokens()
            .issue(IdentityClaims::new(email))
            .expect("token should be issued");
        format!("token={}", token)
    }

    /// Send a request through a fresh clone of the router
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    /// POST /job and return the new id
    pub async fn create_job(&self, job: Value) -> String {
        let (status, body) = self
            .send(unauthed_request(Method::POST, "/job", Some(job)))
            .await;
        assert_eq!(status, StatusCode::OK, "create job failed: {body}");
        body["insertedId"].as_str().unwrap().to_string()
    }

    /// POST /bid and return the status with the parsed body
    pub async fn place_bid(&self, bid: Value) -> (StatusCode, Value) {
        self.send(unauthed_request(Method::POST, "/bid", Some(bid)))
            .await
    }
}

/// Helper: build a request carrying a session cookie
pub fn authed_request(method: Method, uri: &str, cookie: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, cookie);

    with_body(builder, body)
}

/// Helper: build an unauthenticated request
pub fn unauthed_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    with_body(Request::builder().method(method).uri(uri), body)
}

fn with_body(builder: axum::http::request::Builder, body: Option<Value>) -> Request<Body> {
    if let Some(b) = body {
        builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Helper: parse response body as JSON, or as a string for plain-text bodies
pub async fn parse_body(response: axum::http::Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
}

/// A job document posted by `owner`
pub fn job_fixture(title: &str, category: &str, owner: &str) -> Value {
    serde_json::json!({
        "jobTitle": title,
        "category": category,
        "description": format!("{title} for a small business"),
        "min_price": 100,
        "max_price": 500,
        "bid_count": 0,
        "dateline": "2024-06-01T00:00:00.000Z",
        "buyer": {
            "email": owner,
            "name": "Buyer",
            "photo": "https://example.com/buyer.png"
        }
    })
}

/// A bid by `bidder` on `job_id`, which `owner` posted
pub fn bid_fixture(bidder: &str, job_id: &str, owner: &str) -> Value {
    serde_json::json!({
        "email": bidder,
        "jobId": job_id,
        "price": 250,
        "comment": "Can deliver in a week",
        "status": "Pending",
        "buyer": { "email": owner }
    })
}
