//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the generative API directly.
//! All LLM interactions MUST go through this module.
//!
//! Sampling parameters are hardcoded so every generation is requested the same way.
//! No retries and no client-side timeouts: failures surface to the caller immediately.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::blueprint::models::SchemaError;

pub mod extract;

pub use extract::extract_json_object;

pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
const TEMPERATURE: f32 = 0.9;
const TOP_K: u32 = 1;
const TOP_P: f32 = 1.0;
const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (DNS, connection refused, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("HTTP error! status: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("No candidates in the response")]
    EmptyResponse,

    #[error("No valid JSON found in the API response ({reason})")]
    MalformedJson { reason: String, raw: String },

    #[error("Parsed data does not have the expected structure: {0}")]
    Schema(#[from] SchemaError),
}

impl LlmError {
    pub fn code(&self) -> &'static str {
        match self {
            LlmError::Http(_) | LlmError::Api { .. } => "API_ERROR",
            LlmError::EmptyResponse => "EMPTY_RESPONSE",
            LlmError::MalformedJson { .. } => "MALFORMED_JSON",
            LlmError::Schema(_) => "SCHEMA_ERROR",
        }
    }

    pub fn raw_response(&self) -> Option<&str> {
        match self {
            LlmError::MalformedJson { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl LlmResponse {
    /// Extracts `candidates[0].content.parts[0].text`, if non-empty.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by the blueprint generator.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }

    /// Makes a single-turn generation call, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        debug!("Sending request to Gemini API...");

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;
        debug!(
            "Gemini call succeeded: {} candidate(s)",
            llm_response.candidates.len()
        );

        Ok(llm_response)
    }

    /// Calls the LLM and returns the text of the first candidate.
    pub async fn call_text(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        let text = response.text().ok_or(LlmError::EmptyResponse)?;
        debug!("Extracted text content: {text}");
        Ok(text.to_string())
    }

    /// Calls the LLM and locates the first JSON object embedded in its text.
    /// The prompt must instruct the model to return a JSON object.
    pub async fn call_json(&self, prompt: &str) -> Result<Value, LlmError> {
        let text = self.call_text(prompt).await?;
        extract_json_object(&text)
    }
}

/// Builds a Gemini `generateContent` response body wrapping `text`.
#[cfg(test)]
pub(crate) fn gemini_response(text: &str) -> Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    })
}
