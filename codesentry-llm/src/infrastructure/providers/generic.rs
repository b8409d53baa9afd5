//! Generic HTTP provider
//!
//! Used when the configured endpoint is not the Gemini API: a single POST of
//! `{model, prompt}` with a bearer token.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use codesentry_core::DebugLog;

use crate::domain::{GenerationRequest, LlmError, LlmProvider, ProviderInfo};

const DEFAULT_MODEL: &str = "gemini";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct GenericProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
    debug_log: Option<DebugLog>,
}

#[derive(Debug, Serialize)]
struct GenericRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

impl GenericProvider {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug_log: None,
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    pub fn with_debug_log(mut self, debug_log: DebugLog) -> Self {
        self.debug_log = Some(debug_log);
        self
    }

    fn log(&self, message: &str) {
        if let Some(log) = &self.debug_log {
            log.append(message);
        }
    }

    async fn call(&self, body: &GenericRequest<'_>) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        self.log(&format!("RESPONSE status={} text={}", status.as_u16(), text));

        if !status.is_success() {
            error!(status = %status, endpoint = %self.endpoint, "Generic provider error");
            self.log(&format!("EXCEPTION response_text: {}", text));
            return Err(LlmError::from_status(status, text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl LlmProvider for GenericProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "generic",
            name: "Generic HTTP provider",
        }
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError> {
        let model = request
            .model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL);
        let body = GenericRequest {
            model,
            prompt: &request.prompt,
        };

        self.log(&format!(
            "REQUEST to {} headers={{'Authorization': 'Bearer <REDACTED>'}} body={}",
            self.endpoint,
            serde_json::to_string(&body)?
        ));
        debug!(endpoint = %self.endpoint, "Sending request to generic provider");

        self.call(&body)
            .await
            .and_then(|json| extract_result(&json))
            .inspect_err(|e| {
                self.log(&format!("EXCEPTION calling generic provider: {}", e));
            })
    }
}

/// The `result` field when it holds something, otherwise the whole document.
/// Anything but a JSON object is an invalid reply.
pub fn extract_result(json: &Value) -> Result<String, LlmError> {
    let Some(object) = json.as_object() else {
        return Err(LlmError::InvalidResponse(format!(
            "expected a JSON object, got {}",
            json
        )));
    };

    Ok(match object.get("result") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(value) if is_truthy(value) => value.to_string(),
        _ => json.to_string(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
