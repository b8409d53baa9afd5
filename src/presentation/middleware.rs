//! HTTP middleware

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

use crate::presentation::controllers::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log each request with the analysis route in effect and echo the
/// generated request id back in `x-request-id`.
pub async fn logging_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    tracing::debug!(request_id = %request_id, method = %method, path = %path, "Request received");

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = state.analyze_code_use_case.route().name(),
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
