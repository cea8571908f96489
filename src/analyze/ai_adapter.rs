// src/analyze/ai_adapter.rs
//! AI adapter: chat-completion provider abstraction.
//!
//! The real provider speaks the OpenAI-compatible API that Groq exposes; the
//! mock providers make the whole pipeline deterministic under
//! `AI_TEST_MODE`. No caching, no rate limiting: every inbound request maps
//! to exactly one outbound call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ai::AiConfig;
use crate::error::ProviderError;

// ------------------------------------------------------------
// Wire types
// ------------------------------------------------------------

/// One outbound chat-completion request, already shaped for the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// `content` is either a plain string or an array of content parts
/// (text + image_url) for vision models.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    pub r#type: &'static str,
}

impl ChatRequest {
    /// A single system+user exchange requesting a JSON-object response.
    pub fn json_object(model: &str, system: &str, user_content: Value) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: Value::String(system.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            response_format: ResponseFormat {
                r#type: "json_object",
            },
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

// ------------------------------------------------------------
// Provider abstraction + concrete providers
// ------------------------------------------------------------

/// Low-level provider: performs one remote call and returns the single
/// choice's message content as raw text.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Trait object used by the orchestration layer and tests.
pub type DynChatProvider = Arc<dyn ChatProvider>;

/// Groq provider (OpenAI-compatible chat completions endpoint).
pub struct GroqProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GroqProvider {
    /// Credentials and endpoint come from the injected config; the provider
    /// itself never reads the environment.
    pub fn new(cfg: &AiConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("food-label-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            // Vision payloads carry a whole base64 photo upstream.
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        }
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingCredentials);
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Resp = resp.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}

/// Deterministic provider for tests and local runs: echoes fixed content.
#[derive(Clone)]
pub struct MockProvider {
    pub content: String,
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, ProviderError> {
        Ok(self.content.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Always fails; exercises the external-call error path.
pub struct FailingProvider;

#[async_trait]
impl ChatProvider for FailingProvider {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Api {
            status: 503,
            message: "provider unavailable (test)".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Factory: build a provider according to config and `AI_TEST_MODE`.
///
/// * `AI_TEST_MODE=mock`: deterministic, well-formed analysis JSON.
/// * `AI_TEST_MODE=malformed`: non-JSON content, exercises the parse path.
/// * `AI_TEST_MODE=error`: provider failure.
/// * otherwise: the real Groq provider built from `cfg`.
pub fn build_provider(cfg: &AiConfig) -> DynChatProvider {
    match std::env::var("AI_TEST_MODE").ok().as_deref() {
        Some("mock") => Arc::new(MockProvider {
            content: sample_analysis_json().to_string(),
        }),
        Some("malformed") => Arc::new(MockProvider {
            content: "Sorry, I can only describe food labels.".to_string(),
        }),
        Some("error") => Arc::new(FailingProvider),
        _ => Arc::new(GroqProvider::new(cfg)),
    }
}

/// Well-formed `AnalysisResult` JSON served by the mock provider.
pub fn sample_analysis_json() -> Value {
    json!({
        "verdict": "Moderately Processed",
        "reasoning": "Mostly recognizable ingredients with added sweeteners and a preservative.",
        "tradeoffs": [
            {
                "benefit": "Whole grain oats provide fiber",
                "concern": "Added sugar raises the glycemic load"
            }
        ],
        "sugar_info": {
            "level": "Medium",
            "explanation": "Sugar is the second listed ingredient."
        },
        "suitability": {
            "best_for": ["active adults"],
            "caution_for": ["people limiting added sugar"]
        },
        "confidence_score": 0.9,
        "uncertainty": "Serving size was not visible on the label."
    })
}
