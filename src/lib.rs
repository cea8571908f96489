// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod ai_bootstrap;
pub mod analyze;
pub mod api;
pub mod config;
pub mod contract;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod prompt;

// ---- Re-exports for stable public API ----
// Back-compat style: `crate_root::ai_adapter::...`
pub use analyze::ai_adapter;
pub use crate::api::router;
pub use crate::contract::{validate, AnalysisResult, ValidationError};
pub use crate::extract::extract_ingredients;

use axum::Router;
use tracing::info;

/// Build the same Router the binary serves, with state from the environment
/// (`GROQ_*` variables and `AI_TEST_MODE`).
pub async fn app() -> anyhow::Result<Router> {
    let runtime = ai_bootstrap::AiRuntime::from_env();
    Ok(api::router(api::AppState {
        analyzer: runtime.analyzer,
    }))
}

/// One-off smoke test of the configured provider, reading `config/ai.json`.
/// It won't panic on failure; it just logs the result.
pub async fn run_ai_quick_probe() -> anyhow::Result<()> {
    let runtime = ai_bootstrap::AiRuntime::from_path("config/ai.json")?;
    runtime.quick_probe().await;
    info!("AI quick probe finished");
    Ok(())
}
