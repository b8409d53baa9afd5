//! HTTP controllers and shared state

pub mod admin;
pub mod analysis;
pub mod health;

use std::sync::Arc;

use codesentry_core::config::LlmConfig;
use codesentry_core::{DebugLog, DetectedModelCache};
use codesentry_llm::AnalyzeCodeUseCase;

/// Provider facts fixed at startup and reported by the admin endpoints
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub gemini_api_key_set: bool,
    pub openai_api_key_set: bool,
    /// Endpoint chosen by the resolver
    pub gemini_api_url: String,
    pub candidate_models: Vec<String>,
    pub default_model: String,
}

impl ProviderSettings {
    pub fn new(config: &LlmConfig, gemini_api_url: String) -> Self {
        Self {
            gemini_api_key_set: config.has_gemini_key(),
            openai_api_key_set: config.has_openai_key(),
            gemini_api_url,
            candidate_models: config.candidate_models.clone(),
            default_model: config.default_model.clone(),
        }
    }
}

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<ProviderSettings>,
    pub analyze_code_use_case: Arc<AnalyzeCodeUseCase>,
    pub debug_log: DebugLog,
    pub model_cache: DetectedModelCache,
}
