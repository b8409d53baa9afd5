//! API request/response models

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

fn default_model() -> Option<String> {
    Some("Gemini".to_string())
}

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub code: String,
    pub language: Option<String>,
    #[serde(default = "default_model")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `GET /api/admin`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStatusResponse {
    pub gemini_api_key_set: bool,
    pub gemini_api_url: String,
    pub detected_model_cache: Option<String>,
    pub recent_errors: Vec<String>,
}

/// `GET /api/debug`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugStatusResponse {
    pub status: String,
    /// "configured" or "missing"
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_detected_model: Option<String>,
    /// "configured" or "missing"
    pub openai_api_key: String,
    pub last_error: Option<String>,
    pub fallback_chain: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub value: String,
    pub label: String,
}

/// `GET /api/models`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub models: Vec<ModelOption>,
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Handler error rendered as [`ErrorResponse`]
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
