// src/api.rs
//! HTTP surface: the two analyze endpoints plus health.
//!
//! The two endpoints keep their historical error shapes: the image variant
//! answers 400/500, the text variant 400/422 with a `detail` field carrying
//! the underlying diagnostic.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::analyze::Analyzer;
use crate::error::AnalysisError;

/// 25 MB: base64 label photos arrive inline in the request body.
const IMAGE_BODY_LIMIT: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze_text))
        .route("/api/analyze", post(analyze_image))
        .layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

// Absent and null both mean "no input"; the handlers treat them alike.
#[derive(serde::Deserialize)]
struct AnalyzeTextReq {
    #[serde(default, rename = "rawText")]
    raw_text: Option<String>,
}

#[derive(serde::Deserialize)]
struct AnalyzeImageReq {
    #[serde(default, rename = "base64Image")]
    base64_image: Option<String>,
}

async fn analyze_text(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeTextReq>,
) -> Response {
    match state
        .analyzer
        .analyze_text(body.raw_text.as_deref().unwrap_or(""))
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(AnalysisError::InputMissing) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No ingredients detected." })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "AI Reasoning Failure",
                "message": "The AI failed to generate a valid analysis.",
                "detail": err.to_string(),
            })),
        )
            .into_response(),
    }
}

async fn analyze_image(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeImageReq>,
) -> Response {
    match state
        .analyzer
        .analyze_image(body.base64_image.as_deref().unwrap_or(""))
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(AnalysisError::InputMissing) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No image" })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed", "message": err.to_string() })),
        )
            .into_response(),
    }
}
