//! LLM-backed mood classification.

use super::Mood;
use crate::llm::{CompletionOptions, LlmError, LlmProvider, ResponseSchema};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Structured output of mood inference, from either the LLM or keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub mood: Mood,
    pub vibe_description: String,
}

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("LLM request failed: {0}")]
    Transport(LlmError),

    #[error("Malformed classification response: {0}")]
    Malformed(String),
}

impl From<LlmError> for ClassificationError {
    fn from(e: LlmError) -> Self {
        if e.is_transport() {
            ClassificationError::Transport(e)
        } else {
            ClassificationError::Malformed(e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    mood: Option<String>,
    #[serde(rename = "musicVibe")]
    music_vibe: Option<String>,
}

/// Classifies text through an [`LlmProvider`] with a constrained schema.
#[derive(Clone)]
pub struct MoodClassifier {
    provider: Arc<dyn LlmProvider>,
    options: CompletionOptions,
}

impl MoodClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>, options: CompletionOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    pub fn schema() -> ResponseSchema {
        ResponseSchema::object()
            .string_enum("mood", Mood::ALL.iter().map(Mood::as_str), true)
            .string("musicVibe", true)
    }

    pub fn build_prompt(text: &str) -> String {
        let labels = Mood::ALL
            .iter()
            .map(|m| format!("\"{}\"", m.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Analyze the following text for the user's mood and suggest a suitable music vibe.\n\
             The mood should be ONE of: {labels}.\n\
             The musicVibe should be a short description of the type of music.\n\
             Return the response in JSON format: {{\"mood\": \"...\", \"musicVibe\": \"...\"}}.\n\
             \n\
             Text: \"{text}\"\n"
        )
    }

    /// Parse the model's JSON reply.
    ///
    /// A reply without `mood` is malformed. A `mood` outside the six labels is
    /// coerced to neutral and the rest of the result is kept. A missing or blank
    /// `musicVibe` is replaced by the mood's default vibe.
    pub fn parse_response(json_text: &str) -> Result<ClassificationResult, ClassificationError> {
        let raw: RawClassification = serde_json::from_str(json_text)
            .map_err(|e| ClassificationError::Malformed(format!("invalid JSON: {}", e)))?;
        let label = raw
            .mood
            .ok_or_else(|| ClassificationError::Malformed("missing `mood` field".to_string()))?;

        let mood = Mood::from_label_or_neutral(&label.to_lowercase());
        let vibe_description = raw
            .music_vibe
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| mood.default_vibe().to_string());

        Ok(ClassificationResult {
            mood,
            vibe_description,
        })
    }

    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassificationError> {
        let prompt = Self::build_prompt(text);
        let json_text = self
            .provider
            .generate_json(&prompt, &Self::schema(), &self.options)
            .await?;
        debug!(provider = self.provider.name(), raw = %json_text, "LLM classification reply");
        Self::parse_response(&json_text)
    }
}
