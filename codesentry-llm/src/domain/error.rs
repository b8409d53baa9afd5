//! LLM-specific error types

use std::fmt;

/// LLM operation error
///
/// Messages built from an HTTP failure start with the status line
/// (e.g. `429 Too Many Requests`), which callers rely on when choosing
/// the wording of a fallback.
#[derive(Debug, Clone)]
pub enum LlmError {
    /// Authentication failed (invalid API key, expired token, etc.)
    Authentication(String),

    /// Rate limited by the provider
    RateLimited(String),

    /// Model not found or not available
    ModelNotFound(String),

    /// Network/connection error
    Network(String),

    /// Request timed out
    Timeout(String),

    /// Service temporarily unavailable
    ServiceUnavailable(String),

    /// Provider returned an unexpected response
    InvalidResponse(String),

    /// Provider is missing credentials or settings
    Configuration(String),
}

impl LlmError {
    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        let message = format!("{} {}", status, body.into());
        match status.as_u16() {
            429 => LlmError::RateLimited(message),
            401 | 403 => LlmError::Authentication(message),
            404 => LlmError::ModelNotFound(message),
            s if s >= 500 => LlmError::ServiceUnavailable(message),
            _ => LlmError::InvalidResponse(message),
        }
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited(_))
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            LlmError::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            LlmError::ModelNotFound(msg) => write!(f, "Model not found: {}", msg),
            LlmError::Network(msg) => write!(f, "Network error: {}", msg),
            LlmError::Timeout(msg) => write!(f, "Request timed out: {}", msg),
            LlmError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            LlmError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            LlmError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(err.to_string())
        } else if err.is_connect() {
            LlmError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            LlmError::InvalidResponse(err.to_string())
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}
