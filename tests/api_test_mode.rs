// tests/api_test_mode.rs
//
// End-to-end router behavior when the provider is swapped via AI_TEST_MODE,
// using the same app() the binary serves. Env-mutating, so serialized.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use food_label_analyzer::app; // root-level app()
use serial_test::serial;
use std::env;
use tower::ServiceExt; // for `oneshot`

fn analyze_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"rawText": "Ingredients: oats, sugar, salt"}"#,
        ))
        .expect("failed to build request")
}

#[tokio::test]
#[serial]
async fn analyze_succeeds_in_mock_mode() {
    env::set_var("AI_TEST_MODE", "mock");

    let app = app().await.expect("failed to build app");
    let resp = app.oneshot(analyze_request()).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    env::remove_var("AI_TEST_MODE");
}

#[tokio::test]
#[serial]
async fn analyze_surfaces_provider_error_in_error_mode() {
    env::set_var("AI_TEST_MODE", "error");

    let app = app().await.expect("failed to build app");
    let resp = app.oneshot(analyze_request()).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    env::remove_var("AI_TEST_MODE");
}

#[tokio::test]
#[serial]
async fn analyze_surfaces_parse_failure_in_malformed_mode() {
    env::set_var("AI_TEST_MODE", "malformed");

    let app = app().await.expect("failed to build app");
    let resp = app.oneshot(analyze_request()).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    env::remove_var("AI_TEST_MODE");
}
