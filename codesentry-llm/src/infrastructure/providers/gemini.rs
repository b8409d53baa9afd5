//! Google Gemini provider
//!
//! Talks to the `generateContent` REST endpoint for a fixed model. Every
//! request, response and failure is mirrored to the debug log.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use codesentry_core::DebugLog;

use crate::domain::{GenerationRequest, LlmError, LlmProvider, ProviderInfo};

/// Ambient key used when no key is passed at construction.
pub const AMBIENT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    debug_log: Option<DebugLog>,
}

impl GeminiProvider {
    /// Create a provider for `model`. Without an explicit key the
    /// `GOOGLE_API_KEY` environment variable is used.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.or_else(|| {
            std::env::var(AMBIENT_API_KEY_ENV)
                .ok()
                .filter(|k| !k.trim().is_empty())
        });

        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug_log: None,
        }
    }

    /// Create with custom base URL (for testing or proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    pub fn with_debug_log(mut self, debug_log: DebugLog) -> Self {
        self.debug_log = Some(debug_log);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn log(&self, message: &str) {
        if let Some(log) = &self.debug_log {
            log.append(message);
        }
    }

    async fn call(&self, api_key: &str, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(self.url())
            .timeout(self.timeout)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        self.log(&format!("RESPONSE from genai: status={} body={}", status, text));

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(LlmError::from_status(status, text));
        }

        let value: Value = serde_json::from_str(&text)?;
        Ok(extract_text(&value))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "gemini",
            name: "Google Gemini",
        }
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            let err = LlmError::Configuration("Gemini API key not configured".to_string());
            self.log(&format!("EXCEPTION creating genai client: {}", err));
            return Err(err);
        };

        self.log(&format!(
            "REQUEST to genai model={} prompt_length={}",
            self.model,
            request.prompt.chars().count()
        ));
        debug!(model = %self.model, "Sending request to Gemini");

        self.call(api_key, &request.prompt).await.inspect_err(|e| {
            self.log(&format!("EXCEPTION calling genai generate_content: {}", e));
        })
    }
}

/// Pull the answer text out of a response, trying the known shapes in order:
/// `output_text`, candidate parts, `text`, `output[0].content`. Falls back to
/// the serialized response.
pub fn extract_text(response: &Value) -> String {
    if let Some(text) = non_empty_str(response.get("output_text")) {
        return text.to_string();
    }

    let candidate_text: String = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    if !candidate_text.is_empty() {
        return candidate_text;
    }

    if let Some(text) = non_empty_str(response.get("text")) {
        return text.to_string();
    }

    if let Some(content) = response.pointer("/output/0/content") {
        return match content {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }

    response.to_string()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

// === Gemini API Types ===

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub(crate) fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}
