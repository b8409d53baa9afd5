//! Code analysis use case
//!
//! Builds the prompt, makes one provider call and turns every provider
//! failure into a mock report. Callers only ever see an error for blank
//! input.

use std::sync::Arc;
use tracing::{info, warn};

use codesentry_core::config::{GEMINI_API_HOST, LlmConfig};
use codesentry_core::{DebugLog, build_mock_analysis};

use crate::domain::{GenerationRequest, LlmProvider};
use crate::infrastructure::prompts::build_analysis_prompt;
use crate::infrastructure::providers::{GeminiProvider, GenericProvider};

pub const REASON_RATE_LIMITED: &str = "Gemini rate limit hit; showing mock analysis";
pub const REASON_GEMINI_UNAVAILABLE: &str = "Gemini unavailable; showing mock analysis";
pub const REASON_PROVIDER_UNAVAILABLE: &str = "Provider unavailable; showing mock analysis";
pub const REASON_NO_CREDENTIALS: &str = "no Gemini credentials configured";

/// Which provider handles analysis requests, fixed at startup
///
/// Evaluated in priority order: a configured Gemini key always selects
/// `Primary`, whatever endpoint the resolver reported. `Generic` comes
/// second and is only built through [`ProviderRoute::generic`].
#[derive(Clone)]
pub enum ProviderRoute {
    /// Gemini client on the fixed analysis model
    Primary(Arc<dyn LlmProvider>),
    /// `{model, prompt}` POST to a non-Gemini endpoint
    Generic(Arc<dyn LlmProvider>),
    /// No key; always answer with the mock report
    Unconfigured,
}

impl ProviderRoute {
    /// Route for the given settings. The endpoint URL is only reported; the
    /// Gemini client always targets `analysis_model` under `base_url`.
    pub fn from_config(config: &LlmConfig, endpoint_url: &str, debug_log: &DebugLog) -> Self {
        let Some(api_key) = config.gemini_api_key.clone() else {
            return ProviderRoute::Unconfigured;
        };

        let provider = GeminiProvider::new(Some(api_key), config.analysis_model.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout_seconds)
            .with_debug_log(debug_log.clone());
        if !is_gemini_endpoint(config, endpoint_url) {
            warn!(
                endpoint = %endpoint_url,
                model = provider.model(),
                "Endpoint override is not a Gemini URL; analysis still calls Gemini"
            );
        }
        ProviderRoute::Primary(Arc::new(provider))
    }

    /// Generic route for a non-Gemini endpoint. `None` when the URL is a
    /// Gemini endpoint, which belongs to the primary route.
    pub fn generic(
        config: &LlmConfig,
        endpoint_url: &str,
        api_key: impl Into<String>,
        debug_log: &DebugLog,
    ) -> Option<Self> {
        if is_gemini_endpoint(config, endpoint_url) {
            return None;
        }
        let provider = GenericProvider::new(endpoint_url, api_key)
            .with_timeout(config.generic_timeout_seconds)
            .with_debug_log(debug_log.clone());
        Some(ProviderRoute::Generic(Arc::new(provider)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderRoute::Primary(_) => "primary",
            ProviderRoute::Generic(_) => "generic",
            ProviderRoute::Unconfigured => "mock",
        }
    }
}

fn is_gemini_endpoint(config: &LlmConfig, endpoint_url: &str) -> bool {
    endpoint_url.contains(GEMINI_API_HOST) || endpoint_url.starts_with(&config.base_url)
}

/// Input for one analysis
#[derive(Debug, Clone, Default)]
pub struct AnalyzeCodeRequest {
    pub code: String,
    pub language: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("No code provided")]
    EmptyCode,
}

pub struct AnalyzeCodeUseCase {
    route: ProviderRoute,
    debug_log: DebugLog,
}

impl AnalyzeCodeUseCase {
    pub fn new(route: ProviderRoute, debug_log: DebugLog) -> Self {
        Self { route, debug_log }
    }

    pub fn route(&self) -> &ProviderRoute {
        &self.route
    }

    pub async fn execute(&self, request: &AnalyzeCodeRequest) -> Result<String, AnalyzeError> {
        if request.code.trim().is_empty() {
            return Err(AnalyzeError::EmptyCode);
        }

        let prompt = build_analysis_prompt(request.language.as_deref(), &request.code);
        let mock = |reason: &str| {
            build_mock_analysis(reason, request.language.as_deref(), request.model.as_deref())
        };

        match &self.route {
            ProviderRoute::Primary(provider) => {
                let generation = GenerationRequest::new(prompt);
                match provider.generate(generation).await {
                    Ok(text) => Ok(text),
                    Err(e) => {
                        let message = e.to_string();
                        self.debug_log.append(&format!(
                            "Top-level handler caught exception: {}",
                            message
                        ));
                        let info = provider.info();
                        warn!(
                            provider = info.id,
                            provider_name = info.name,
                            error = %message,
                            "Analysis fell back to mock"
                        );
                        let reason = if e.is_rate_limited() || message.contains("429") {
                            REASON_RATE_LIMITED
                        } else {
                            REASON_GEMINI_UNAVAILABLE
                        };
                        Ok(mock(reason))
                    }
                }
            }
            ProviderRoute::Generic(provider) => {
                let generation = GenerationRequest::new(prompt).with_model(request.model.clone());
                match provider.generate(generation).await {
                    Ok(text) => Ok(text),
                    Err(e) => {
                        self.debug_log
                            .append(&format!("Generic provider error: {}", e));
                        let info = provider.info();
                        warn!(
                            provider = info.id,
                            provider_name = info.name,
                            error = %e,
                            "Analysis fell back to mock"
                        );
                        Ok(mock(REASON_PROVIDER_UNAVAILABLE))
                    }
                }
            }
            ProviderRoute::Unconfigured => {
                info!("No provider credentials; returning mock analysis");
                Ok(mock(REASON_NO_CREDENTIALS))
            }
        }
    }
}
