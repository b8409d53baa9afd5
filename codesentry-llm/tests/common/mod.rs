//! Common test utilities and mock implementations

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use codesentry_core::DebugLog;
use codesentry_llm::domain::{GenerationRequest, LlmError, LlmProvider, ProviderInfo};
use tempfile::TempDir;

/// Mock LLM provider for testing
pub struct MockLlmProvider {
    /// Text to return from generate()
    pub response: Option<String>,
    /// Error to return (if any)
    pub error: Option<LlmError>,
    /// Captured requests for verification
    pub captured_requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockLlmProvider {
    pub fn new() -> Self {
        Self {
            response: None,
            error: None,
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    pub fn with_error(mut self, error: LlmError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn captured(&self) -> Vec<GenerationRequest> {
        self.captured_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "mock",
            name: "Mock Provider",
        }
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError> {
        self.captured_requests.lock().unwrap().push(request);

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        self.response
            .clone()
            .ok_or_else(|| LlmError::InvalidResponse("No response configured".to_string()))
    }
}

/// Debug log inside a fresh temporary directory. Keep the `TempDir` alive.
pub fn temp_debug_log() -> (TempDir, DebugLog) {
    let dir = TempDir::new().expect("create temp dir");
    let log = DebugLog::new(dir.path().join("gemini_debug.log"));
    (dir, log)
}

/// Whole debug log content, empty when the file does not exist.
pub fn read_log(log: &DebugLog) -> String {
    std::fs::read_to_string(log.path()).unwrap_or_default()
}
