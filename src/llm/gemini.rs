//! Google Gemini provider implementation.
//!
//! Uses the `generateContent` endpoint with `responseMimeType` set to JSON
//! and a response schema, so the model replies with a JSON document embedded
//! in the first candidate's first text part.

use super::provider::{CompletionOptions, LlmError, LlmProvider};
use super::types::ResponseSchema;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini LLM provider.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://generativelanguage.googleapis.com/v1beta").
    /// * `model` - Model to use (e.g., "gemini-2.0-flash").
    /// * `api_key` - API key sent with every request.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn build_request(
        prompt: &str,
        schema: &ResponseSchema,
        options: &CompletionOptions,
    ) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.into(),
                temperature: Some(options.temperature),
                max_output_tokens: options.max_tokens,
            },
        }
    }

    /// Pull `candidates[0].content.parts[0].text` out of a response.
    fn extract_text(response: GeminiResponse) -> Result<String, LlmError> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                LlmError::InvalidResponse(
                    "Missing candidates/content/parts in Gemini response".to_string(),
                )
            })
    }

    fn map_send_error(e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Connection(e.to_string())
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_json(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = Self::build_request(prompt, schema, options);

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending structured generation request to Gemini"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = Self::extract_text(gemini_response)?;
        debug!(response_len = text.len(), "Received structured response from Gemini");
        Ok(text)
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            return Err(LlmError::Api {
                status: response.status().as_u16(),
                message: "Health check failed".to_string(),
            });
        }

        Ok(())
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: GeminiSchema,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiSchema {
    #[serde(rename = "type")]
    schema_type: &'static str,
    properties: serde_json::Map<String, serde_json::Value>,
    property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    required: Vec<String>,
}

impl From<&ResponseSchema> for GeminiSchema {
    fn from(schema: &ResponseSchema) -> Self {
        let mut properties = serde_json::Map::new();
        for prop in &schema.properties {
            let mut value = serde_json::json!({ "type": "STRING" });
            if let Some(allowed) = &prop.allowed_values {
                value["format"] = serde_json::json!("enum");
                value["enum"] = serde_json::json!(allowed);
            }
            properties.insert(prop.name.clone(), value);
        }

        GeminiSchema {
            schema_type: "OBJECT",
            properties,
            property_ordering: schema.properties.iter().map(|p| p.name.clone()).collect(),
            required: schema.required_names(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}
