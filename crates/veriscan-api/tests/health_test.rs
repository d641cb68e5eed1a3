//! Health endpoint integration tests.

mod helpers;

use helpers::{setup_test_app, setup_test_app_with_config, test_config};
use serde_json::Value;

#[tokio::test]
async fn test_health_is_public_and_healthy_with_plausible_key() {
    let app = setup_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_configured"], true);
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn test_health_degraded_without_credential() {
    let app = setup_test_app_with_config(test_config(None)).await;

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["api_configured"], false);
    assert_eq!(body["message"], "FIREWORKS_API_KEY not set");
}

#[tokio::test]
async fn test_health_degraded_with_short_key() {
    let app = setup_test_app_with_config(test_config(Some("short"))).await;

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["message"], "API key appears invalid");
}
