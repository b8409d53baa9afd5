//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Host of the Google generative language API.
pub const GEMINI_API_HOST: &str = "generativelanguage.googleapis.com";

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable holding an explicit endpoint URL override.
pub const GEMINI_API_URL_ENV: &str = "GEMINI_API_URL";
/// Environment variable holding the OpenAI API key (presence check only).
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub storage: StorageConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Global request timeout in seconds applied at the HTTP layer.
    /// Must leave room for the slowest provider call.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_seconds: 90,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Generative model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini API key (also read from GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,
    /// Explicit endpoint override (also read from GEMINI_API_URL)
    pub gemini_api_url: Option<String>,
    /// OpenAI API key, only reported by the debug endpoint (also read from OPENAI_API_KEY)
    pub openai_api_key: Option<String>,
    /// Base URL of the Gemini REST API
    pub base_url: String,
    /// Models probed at startup, in priority order
    pub candidate_models: Vec<String>,
    /// Model used when nothing could be detected
    pub default_model: String,
    /// Model the analysis client always calls
    pub analysis_model: String,
    /// Timeout for analysis calls on the Gemini client
    pub timeout_seconds: u64,
    /// Timeout for each startup probe
    pub probe_timeout_seconds: u64,
    /// Timeout for calls to a non-Gemini endpoint
    pub generic_timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_url: None,
            openai_api_key: None,
            base_url: format!("https://{}/v1beta", GEMINI_API_HOST),
            candidate_models: vec!["gemini-2.5-flash".to_string()],
            default_model: "gemini-2.0-flash".to_string(),
            analysis_model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 60,
            probe_timeout_seconds: 5,
            generic_timeout_seconds: 30,
        }
    }
}

impl LlmConfig {
    /// Build the generateContent URL for a model id.
    pub fn model_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// URL used when no override, cache entry or probe result exists.
    pub fn default_model_url(&self) -> String {
        self.model_url(&self.default_model)
    }

    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn has_openai_key(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

/// Local files the backend reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// One-line file holding the model id detected by probing
    pub detected_model_file: PathBuf,
    /// Append-only provider debug log
    pub debug_log_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            detected_model_file: PathBuf::from("gemini_detected_model.txt"),
            debug_log_file: PathBuf::from("gemini_debug.log"),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.logging.validate()?;
        self.llm.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CODESENTRY").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        // Plain provider variables win over everything else
        config.apply_provider_env(|name| std::env::var(name).ok());

        config.validate()?;

        Ok(config)
    }

    /// Override provider credentials from `GEMINI_API_KEY`, `GEMINI_API_URL`
    /// and `OPENAI_API_KEY` as returned by `lookup`. Blank values count as unset.
    pub fn apply_provider_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(GEMINI_API_KEY_ENV) {
            self.llm.gemini_api_key = Some(key);
        }
        if let Some(url) = non_blank(GEMINI_API_URL_ENV) {
            self.llm.gemini_api_url = Some(url);
        }
        if let Some(key) = non_blank(OPENAI_API_KEY_ENV) {
            self.llm.openai_api_key = Some(key);
        }

        // Empty strings from config files behave like missing values
        for value in [
            &mut self.llm.gemini_api_key,
            &mut self.llm.gemini_api_url,
            &mut self.llm.openai_api_key,
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *value = None;
            }
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
