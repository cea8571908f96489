// src/analyze/mod.rs
//! Analysis pipeline: extract the signal, prompt the model, validate the
//! contract. One awaited outbound call per request, no retries, no state.

pub mod ai_adapter;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{debug, warn};

use crate::analyze::ai_adapter::{ChatRequest, DynChatProvider};
use crate::config::ai::AiConfig;
use crate::contract::{self, AnalysisResult};
use crate::error::AnalysisError;
use crate::extract::extract_ingredients;
use crate::prompt;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "analyze_requests_total",
            "Analysis requests that reached the provider, by input kind."
        );
        describe_counter!("provider_errors_total", "Failed outbound model calls.");
        describe_counter!(
            "contract_violations_total",
            "Model responses rejected by the contract validator."
        );
    });
}

/// Anonymized log id: first 6 bytes of sha256, hex. Raw label text is never
/// logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Orchestrates one analysis request end to end.
pub struct Analyzer {
    provider: DynChatProvider,
    text_model: String,
    vision_model: String,
}

impl Analyzer {
    pub fn new(cfg: &AiConfig, provider: DynChatProvider) -> Self {
        ensure_metrics_described();
        Self {
            provider,
            text_model: cfg.text_model.clone(),
            vision_model: cfg.vision_model.clone(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Analyze raw OCR/label text. The extractor runs first; if nothing
    /// survives normalization the request fails before any outbound call.
    pub async fn analyze_text(&self, raw_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let signal = extract_ingredients(raw_text);
        if signal.is_empty() {
            return Err(AnalysisError::InputMissing);
        }

        counter!("analyze_requests_total", "kind" => "text").increment(1);
        debug!(id = %anon_hash(&signal), chars = signal.len(), "analyzing ingredient signal");

        let request = ChatRequest::json_object(
            &self.text_model,
            prompt::TEXT_SYSTEM_PROMPT,
            Value::String(prompt::text_user_prompt(&signal)),
        );
        self.run(request).await
    }

    /// Analyze a base64-encoded label photo via the vision model.
    pub async fn analyze_image(&self, base64_image: &str) -> Result<AnalysisResult, AnalysisError> {
        if base64_image.trim().is_empty() {
            return Err(AnalysisError::InputMissing);
        }

        counter!("analyze_requests_total", "kind" => "image").increment(1);
        debug!(id = %anon_hash(base64_image), bytes = base64_image.len(), "analyzing label photo");

        let request = ChatRequest::json_object(
            &self.vision_model,
            prompt::VISION_SYSTEM_PROMPT,
            prompt::vision_user_content(base64_image),
        )
        .with_temperature(0.1);
        self.run(request).await
    }

    async fn run(&self, request: ChatRequest) -> Result<AnalysisResult, AnalysisError> {
        let content = match self.provider.complete(&request).await {
            Ok(content) => content,
            Err(err) => {
                counter!("provider_errors_total").increment(1);
                warn!(provider = self.provider.name(), error = %err, "model call failed");
                return Err(err.into());
            }
        };

        let candidate: Value = serde_json::from_str(&content)?;

        match contract::validate(&candidate) {
            Ok(result) => Ok(result),
            Err(err) => {
                counter!("contract_violations_total").increment(1);
                warn!(path = %err.path, "model output failed contract validation");
                Err(err.into())
            }
        }
    }
}
