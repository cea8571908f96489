// src/error.rs
//! Error taxonomy for the analysis pipeline.
//!
//! Every variant is terminal for the request; there is no retry loop. The
//! HTTP layer maps these onto the per-endpoint status codes and bodies.

use thiserror::Error;

use crate::contract::ValidationError;

/// Failure modes of one analysis request, in pipeline order.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No usable image/text was supplied; nothing is sent downstream.
    #[error("no usable input")]
    InputMissing,

    /// The outbound model call failed (network, auth, provider-side error).
    #[error("provider call failed: {0}")]
    ExternalCall(#[from] ProviderError),

    /// The model's message content was not parseable JSON.
    #[error("model output is not valid JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    /// The parsed JSON does not satisfy the analysis contract.
    #[error("model output violates the analysis contract: {0}")]
    Contract(#[from] ValidationError),
}

/// Errors raised by a chat-completion provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no API key configured")]
    MissingCredentials,

    #[error("empty response from model")]
    EmptyResponse,
}
