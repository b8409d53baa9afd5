//! Standalone mock server
//!
//! A network-free stand-in for the full backend that answers every
//! analysis request with the mock report. Shares the response contract of
//! the real `/api/analyze` endpoint so frontends can switch between them.

use axum::{
    Json, Router,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use codesentry_core::MockAnalysis;
use codesentry_core::mock::{SIMPLE_SERVER_HINT, SIMPLE_SERVER_REASON};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5174;

/// Bind the listener; `host` may be a hostname or an IP literal.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/api/analyze", post(analyze).fallback(not_found))
        .fallback(not_found)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "not found")
}

async fn analyze(body: Bytes) -> Response {
    let payload: Value = if body.is_empty() {
        json!({})
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting malformed analyze body");
                return error(StatusCode::BAD_REQUEST, "invalid json");
            }
        }
    };

    let field = |name: &str| {
        payload
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    let code = field("code").unwrap_or_default();
    if code.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "No code provided");
    }

    let language = field("language").or_else(|| field("lang"));
    let model = field("model");

    let result = MockAnalysis::new(SIMPLE_SERVER_REASON)
        .with_language(language)
        .with_model(model)
        .with_hint(SIMPLE_SERVER_HINT)
        .render();

    tracing::info!(
        language = language.unwrap_or("unknown"),
        code_length = code.len(),
        "Served mock analysis"
    );

    Json(json!({ "result": result })).into_response()
}
