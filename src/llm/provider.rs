//! LLM provider trait definition.

use super::types::ResponseSchema;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Options for a completion request.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: None,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Request timeout")]
    Timeout,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LlmError {
    /// True for failures of the round trip itself, as opposed to a reply
    /// that arrived but could not be used.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LlmError::Connection(_) | LlmError::Api { .. } | LlmError::RateLimited | LlmError::Timeout
        )
    }
}

/// Trait for LLM providers with structured JSON output.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider's name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Get the model being used.
    fn model(&self) -> &str;

    /// Send a single-turn prompt and ask for JSON conforming to `schema`.
    ///
    /// # Returns
    /// The raw JSON text produced by the model. It is not validated against
    /// the schema; callers must parse it.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
        options: &CompletionOptions,
    ) -> Result<String, LlmError>;

    /// Check if the provider is healthy and reachable.
    async fn health_check(&self) -> Result<(), LlmError>;
}
