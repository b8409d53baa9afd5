//! LLM Provider trait and related types

use async_trait::async_trait;

use crate::domain::error::LlmError;

/// Metadata about a provider
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider identifier (e.g., "gemini", "generic")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
}

/// A single prompt sent to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Free-text model hint from the caller. Providers with a fixed model ignore it.
    pub model: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Core trait for text generation backends
///
/// Implementations make exactly one attempt per call; there is no retry
/// layer. The trait is object-safe and used as `Arc<dyn LlmProvider>`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get provider metadata
    fn info(&self) -> ProviderInfo;

    /// Generate text for the prompt
    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError>;
}
