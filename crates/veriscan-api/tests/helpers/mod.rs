//! Shared helpers for API integration tests: an in-memory database, a scripted
//! extractor, and the real router.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use veriscan_api::setup::routes::build_router;
use veriscan_api::state::AppState;
use veriscan_core::Config;
use veriscan_db::{init_schema, SubmissionRepository, UserRepository};
use veriscan_extraction::testing::MockExtractor;

pub struct TestApp {
    pub server: TestServer,
    pub extractor: Arc<MockExtractor>,
}

pub struct TestUser {
    pub id: i64,
    pub token: String,
}

pub fn test_config(api_key: Option<&str>) -> Config {
    Config {
        fireworks_api_key: api_key.map(str::to_string),
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expiry_hours: 24,
        server_port: 0,
        environment: "development".to_string(),
    }
}

/// Build the real router over an in-memory database and a mock extractor.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_config(test_config(Some("fw-integration-test-key"))).await
}

pub async fn setup_test_app_with_config(config: Config) -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    init_schema(&pool).await.expect("schema");

    let extractor = Arc::new(MockExtractor::default());
    let state = Arc::new(AppState {
        config,
        users: UserRepository::new(pool.clone()),
        submissions: SubmissionRepository::new(pool),
        extractor: extractor.clone(),
    });

    let server = TestServer::new(build_router(state)).expect("test server");
    TestApp { server, extractor }
}

/// Register a fresh user and hand back its id and bearer token.
pub async fn register_test_user(server: &TestServer, username: &str) -> TestUser {
    let response = server
        .post("/auth/register")
        .json(&json!({"username": username, "password": "secret-pw"}))
        .await;
    assert_eq!(response.status_code(), 201, "register failed: {}", response.text());

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"].as_i64().expect("user id"),
        token: body["token"].as_str().expect("token").to_string(),
    }
}

pub fn bearer(user: &TestUser) -> String {
    format!("Bearer {}", user.token)
}
