// src/config/ai.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TEXT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}
fn default_vision_model() -> String {
    DEFAULT_VISION_MODEL.to_string()
}

/// Provider configuration, injected into the adapter at construction. The
/// adapter itself never touches the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// OpenAI-compatible endpoint root.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model for raw-text analysis.
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Vision-capable model for label photos.
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    /// "ENV" means: read from GROQ_API_KEY.
    pub api_key: String,
}

impl AiConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: AiConfig = serde_json::from_str(&data)?;

        // Resolve api key if "ENV"
        if cfg.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.api_key = env::var("GROQ_API_KEY")
                .map_err(|_| anyhow::anyhow!("Missing GROQ_API_KEY env var"))?;
        }

        if cfg.base_url.trim().is_empty() {
            cfg.base_url = default_base_url();
        }

        Ok(cfg)
    }

    /// Common path: everything from the process environment, with sane
    /// defaults. A missing key is tolerated here; the provider rejects the
    /// call instead, so test modes work without credentials.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("GROQ_BASE_URL").unwrap_or_else(|_| default_base_url()),
            text_model: env::var("GROQ_TEXT_MODEL").unwrap_or_else(|_| default_text_model()),
            vision_model: env::var("GROQ_VISION_MODEL").unwrap_or_else(|_| default_vision_model()),
            api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
        }
    }
}
