//! Code analysis controller

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use codesentry_llm::{AnalyzeCodeRequest, AnalyzeError};

use crate::presentation::controllers::AppState;
use crate::presentation::models::{AnalyzeRequest, AnalyzeResponse, ApiError};

/// POST /api/analyze
///
/// Always answers 200 for non-blank code; provider failures surface only as
/// mock text in `result`.
pub async fn analyze_code(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::new(rejection.status(), rejection.body_text())
    })?;

    let request = AnalyzeCodeRequest {
        code: request.code,
        language: request.language,
        model: request.model,
    };

    let result = state
        .analyze_code_use_case
        .execute(&request)
        .await
        .map_err(|e| match e {
            AnalyzeError::EmptyCode => ApiError::bad_request(e.to_string()),
        })?;

    Ok(Json(AnalyzeResponse { result }))
}
