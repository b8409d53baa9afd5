//! Health check controllers

use axum::{Json, http::StatusCode};

use crate::presentation::models::HealthResponse;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /favicon.ico - answered with no content so browsers stop asking
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
