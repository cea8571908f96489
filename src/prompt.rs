// src/prompt.rs
//! Prompt construction for the chat-completion call.
//!
//! The system prompts spell out the exact JSON keys the contract validator
//! enforces; keep the two in sync when the contract changes.

use serde_json::{json, Value};

/// System prompt for raw-text analysis. The key list must match the
/// analysis contract exactly.
pub const TEXT_SYSTEM_PROMPT: &str = "You are a professional Food Scientist. Analyze the ingredients and keep the explanation easy to understand for everyone, from gym-goers to older readers. \
You MUST return the response as a JSON object with these EXACT keys: \
verdict, reasoning, tradeoffs (an array of objects with 'benefit' and 'concern' keys), \
sugar_info (level and explanation), suitability (best_for and caution_for arrays), and uncertainty. \
Do not omit 'benefit' or 'concern' from any tradeoff entry.";

/// System prompt for label-photo analysis. Demands the strict-numeric
/// confidence_score on top of the shared key set.
pub const VISION_SYSTEM_PROMPT: &str = r#"You are a Food Scientist. Scan the label and return ONLY JSON.
CRITICAL: "confidence_score" MUST be a number between 0.0 and 1.0 (no strings).
Example: "confidence_score": 0.95

SCHEMA: {
  "verdict": "string",
  "reasoning": "string",
  "tradeoffs": [{"benefit": "string", "concern": "string"}],
  "sugar_info": {"level": "High|Medium|Low", "explanation": "string"},
  "suitability": {"best_for": ["string"], "caution_for": ["string"]},
  "confidence_score": 0.95,
  "uncertainty": "string"
}"#;

/// User message for the text variant, carrying the extracted signal.
pub fn text_user_prompt(signal: &str) -> String {
    format!("Analyze this ingredient list: {signal}")
}

/// User content parts for the vision variant: an instruction plus the
/// label photo as an inline data URL.
pub fn vision_user_content(base64_image: &str) -> Value {
    json!([
        { "type": "text", "text": "Analyze this ingredient label." },
        {
            "type": "image_url",
            "image_url": { "url": format!("data:image/jpeg;base64,{base64_image}") }
        }
    ])
}
