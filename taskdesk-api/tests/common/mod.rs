//! Common test utilities for integration tests
//!
//! Builds the real router over in-memory stores with cheap password hashing,
//! and wraps the request plumbing used by every test.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use taskdesk_api::app::{build_router, AppState};
use taskdesk_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, LogFormat};
use taskdesk_shared::auth::jwt::TokenService;
use taskdesk_shared::auth::password::PasswordParams;
use taskdesk_shared::store::memory::MemoryStore;
use tower::Service as _;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test configuration; never read from the environment
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            run_migrations: false,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_ttl_secs: 3600,
        },
        password: PasswordParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        log_format: LogFormat::Pretty,
    }
}

/// Test context containing the router and its backing store
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenService,
}

impl TestContext {
    /// Creates a new test context with empty stores
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_stores(store.clone(), store.clone(), test_config())
            .expect("valid password params");
        let tokens = state.tokens.clone();

        TestContext {
            app: build_router(state),
            store,
            tokens,
        }
    }

    /// Sends a request and returns status plus parsed JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    /// Sends a prebuilt request
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, body)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/api/register",
            None,
            Some(json!({ "username": username, "email": email, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers `username` and returns a fresh access token
    pub async fn signup(&self, username: &str) -> String {
        let (status, body) = self
            .register(username, &format!("{}@example.com", username), "password123")
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let (status, body) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Creates a task and returns its JSON representation
    pub async fn create_task(&self, token: &str, body: Value) -> Value {
        let (status, body) = self.send("POST", "/api/tasks", Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["task"].clone()
    }
}
