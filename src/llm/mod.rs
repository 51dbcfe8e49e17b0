//! LLM provider abstraction layer.
//!
//! This module provides a trait-based abstraction for structured-output LLM
//! backends, so mood classification does not depend on a specific vendor.

mod gemini;
mod provider;
mod types;

pub use gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{PropertySchema, ResponseSchema};
