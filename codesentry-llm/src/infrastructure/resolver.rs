//! Startup model resolution
//!
//! Picks the endpoint URL the backend reports. The order is: explicit
//! override, cached model id, probe of the candidate list, and finally the
//! configured default model. Without a Gemini key only the override and the
//! default apply.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

use codesentry_core::DetectedModelCache;
use codesentry_core::config::LlmConfig;

use crate::infrastructure::providers::gemini::GenerateContentRequest;

const PROBE_PROMPT: &str = "Ping";

/// Where the resolved endpoint came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    Override,
    Cache,
    Probe,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub url: String,
    pub source: EndpointSource,
}

pub struct ModelResolver {
    client: Client,
    config: LlmConfig,
    cache: DetectedModelCache,
}

impl ModelResolver {
    pub fn new(config: LlmConfig, cache: DetectedModelCache) -> Self {
        Self {
            client: Client::new(),
            config,
            cache,
        }
    }

    pub async fn resolve(&self) -> ResolvedEndpoint {
        if let Some(url) = &self.config.gemini_api_url {
            info!(url = %url, "Using explicit Gemini endpoint override");
            return ResolvedEndpoint {
                url: url.clone(),
                source: EndpointSource::Override,
            };
        }

        let Some(api_key) = &self.config.gemini_api_key else {
            info!(model = %self.config.default_model, "No Gemini key; using default model");
            return self.default_endpoint();
        };

        if let Some(model) = self.cache.model() {
            info!(model = %model, "Using cached detected model");
            return ResolvedEndpoint {
                url: self.config.model_url(&model),
                source: EndpointSource::Cache,
            };
        }

        if let Some(model) = self.probe_candidates(api_key).await {
            if let Err(e) = self.cache.write(&model) {
                warn!(
                    path = %self.cache.path().display(),
                    error = %e,
                    "Failed to persist detected model"
                );
            }
            info!(model = %model, "Detected Gemini model by probing");
            return ResolvedEndpoint {
                url: self.config.model_url(&model),
                source: EndpointSource::Probe,
            };
        }

        info!(model = %self.config.default_model, "Falling back to default Gemini model");
        self.default_endpoint()
    }

    fn default_endpoint(&self) -> ResolvedEndpoint {
        ResolvedEndpoint {
            url: self.config.default_model_url(),
            source: EndpointSource::Default,
        }
    }

    /// First candidate the service does not reject with 401 or 404.
    async fn probe_candidates(&self, api_key: &str) -> Option<String> {
        let body = GenerateContentRequest::from_prompt(PROBE_PROMPT);
        let timeout = Duration::from_secs(self.config.probe_timeout_seconds);

        for candidate in &self.config.candidate_models {
            let url = self.config.model_url(candidate);
            let result = self
                .client
                .post(&url)
                .query(&[("key", api_key)])
                .timeout(timeout)
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status != StatusCode::UNAUTHORIZED && status != StatusCode::NOT_FOUND {
                        return Some(candidate.clone());
                    }
                    debug!(model = %candidate, status = %status, "Candidate model rejected");
                }
                Err(e) => {
                    debug!(model = %candidate, error = %e, "Probe request failed");
                }
            }
        }

        None
    }
}

/// Model id embedded in a `.../models/<id>:<method>` URL.
pub fn extract_model_from_url(url: &str) -> Option<String> {
    let (_, segment) = url.split_once("models/")?;
    let model = segment.split(':').next().unwrap_or_default().trim();
    (!model.is_empty()).then(|| model.to_string())
}
