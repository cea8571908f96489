// src/ai_bootstrap.rs
use crate::analyze::ai_adapter::build_provider;
use crate::analyze::Analyzer;
use crate::config::ai::AiConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Config + analyzer built once at startup and shared by every request.
pub struct AiRuntime {
    pub cfg: AiConfig,
    pub analyzer: Arc<Analyzer>,
}

impl AiRuntime {
    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let cfg = AiConfig::load_from_file(path)?;
        Ok(Self::from_config(cfg))
    }

    pub fn from_env() -> Self {
        Self::from_config(AiConfig::from_env())
    }

    pub fn from_config(cfg: AiConfig) -> Self {
        // Safe diagnostics: never the key itself
        info!(
            "AI cfg loaded: base_url={}, text_model={}, vision_model={}, key_len={}",
            cfg.base_url,
            cfg.text_model,
            cfg.vision_model,
            cfg.api_key.len()
        );
        let provider = build_provider(&cfg);
        let analyzer = Arc::new(Analyzer::new(&cfg, provider));
        Self { cfg, analyzer }
    }

    /// One-off smoke call against the configured provider. Logs the outcome,
    /// never panics.
    pub async fn quick_probe(&self) {
        if self.cfg.api_key.is_empty() {
            warn!("AI quick_probe skipped: no API key configured");
            return;
        }
        let sample = "Ingredients: water, sugar, citric acid, natural flavor.";
        match self.analyzer.analyze_text(sample).await {
            Ok(result) => info!(verdict = %result.verdict, "AI quick_probe ok"),
            Err(err) => warn!(error = %err, "AI quick_probe failed"),
        }
    }
}
