use crate::presentation::middleware::REQUEST_ID_HEADER;
use crate::presentation::{AppState, ProviderSettings, create_router};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use codesentry_core::config::{LlmConfig, ServerConfig};
use codesentry_core::{DebugLog, DetectedModelCache};
use codesentry_llm::{
    AnalyzeCodeUseCase, GenerationRequest, LlmError, LlmProvider, ProviderInfo, ProviderRoute,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

// Provider that answers every prompt with a fixed outcome
struct StubProvider {
    outcome: Result<String, LlmError>,
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "stub",
            name: "Stub provider",
        }
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<String, LlmError> {
        self.outcome.clone()
    }
}

fn test_state(dir: &TempDir, route: ProviderRoute, llm: &LlmConfig) -> AppState {
    let debug_log = DebugLog::new(dir.path().join("debug.log"));
    let model_cache = DetectedModelCache::new(dir.path().join("detected_model.txt"));

    AppState {
        settings: Arc::new(ProviderSettings::new(llm, llm.default_model_url())),
        analyze_code_use_case: Arc::new(AnalyzeCodeUseCase::new(route, debug_log.clone())),
        debug_log,
        model_cache,
    }
}

fn app(dir: &TempDir, route: ProviderRoute) -> Router {
    create_router(
        test_state(dir, route, &LlmConfig::default()),
        &ServerConfig::default(),
    )
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(app(&dir, ProviderRoute::Unconfigured), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let dir = TempDir::new().unwrap();
    let router = app(&dir, ProviderRoute::Unconfigured);

    let first = router.clone().oneshot(get("/health")).await.unwrap();
    let second = router.oneshot(get("/api/unknown")).await.unwrap();

    let first_id = first.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    let second_id = second.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert_eq!(first_id.len(), 36);
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_favicon_is_empty() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(app(&dir, ProviderRoute::Unconfigured), get("/favicon.ico")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_analyze_blank_code_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(
        app(&dir, ProviderRoute::Unconfigured),
        post_json("/api/analyze", json!({"code": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "No code provided"}));
}

#[tokio::test]
async fn test_analyze_missing_code_field() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(
        app(&dir, ProviderRoute::Unconfigured),
        post_json("/api/analyze", json!({"language": "python"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("code"));
}

#[tokio::test]
async fn test_analyze_without_credentials_returns_mock() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(
        app(&dir, ProviderRoute::Unconfigured),
        post_json("/api/analyze", json!({"code": "print(1)"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let result = body["result"].as_str().unwrap();
    assert!(result.contains("no Gemini credentials configured"));
    assert!(result.contains("Language: unknown"));
    assert!(result.contains("Model: Gemini"));
    assert!(result.contains("1. Line 3: Missing error handling"));
    assert!(result.contains("2. Line 7: Unused variable 'temp'"));
}

#[tokio::test]
async fn test_analyze_returns_provider_text() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider {
        outcome: Ok("No issues found.".to_string()),
    };
    let (status, body) = send(
        app(&dir, ProviderRoute::Primary(Arc::new(provider))),
        post_json("/api/analyze", json!({"code": "fn main() {}", "language": "rust"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "No issues found."}));
}

#[tokio::test]
async fn test_analyze_rate_limit_falls_back_and_is_logged() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider {
        outcome: Err(LlmError::RateLimited(
            "429 Too Many Requests quota exceeded".to_string(),
        )),
    };
    let (status, body) = send(
        app(&dir, ProviderRoute::Primary(Arc::new(provider))),
        post_json("/api/analyze", json!({"code": "x = 1", "language": "python"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result = body["result"].as_str().unwrap();
    assert!(result.contains("Gemini rate limit hit; showing mock analysis"));
    assert!(result.contains("Language: python"));

    let log = std::fs::read_to_string(dir.path().join("debug.log")).unwrap();
    assert!(log.contains("Top-level handler caught exception: Rate limited: 429"));
}

#[tokio::test]
async fn test_analyze_generic_failure_uses_provider_reason() {
    let dir = TempDir::new().unwrap();
    let provider = StubProvider {
        outcome: Err(LlmError::ServiceUnavailable("502 Bad Gateway".to_string())),
    };
    let (status, body) = send(
        app(&dir, ProviderRoute::Generic(Arc::new(provider))),
        post_json("/api/analyze", json!({"code": "x", "model": "custom-model"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result = body["result"].as_str().unwrap();
    assert!(result.contains("Provider unavailable; showing mock analysis"));
    assert!(result.contains("Model: custom-model"));
}

#[tokio::test]
async fn test_admin_status_without_key() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(app(&dir, ProviderRoute::Unconfigured), get("/api/admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gemini_api_key_set"], json!(false));
    assert_eq!(
        body["gemini_api_url"],
        json!(LlmConfig::default().default_model_url())
    );
    assert_eq!(body["detected_model_cache"], Value::Null);
    assert_eq!(body["recent_errors"], json!([]));
}

#[tokio::test]
async fn test_admin_reports_cached_model() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, ProviderRoute::Unconfigured, &LlmConfig::default());
    state.model_cache.write("gemini-2.5-flash").unwrap();
    let router = create_router(state, &ServerConfig::default());

    let (_, body) = send(router, get("/api/admin")).await;
    assert_eq!(body["detected_model_cache"], json!("gemini-2.5-flash"));
}

#[tokio::test]
async fn test_debug_status() {
    let dir = TempDir::new().unwrap();
    let llm = LlmConfig {
        gemini_api_key: Some("key".to_string()),
        openai_api_key: Some("sk-test".to_string()),
        ..LlmConfig::default()
    };
    let state = test_state(&dir, ProviderRoute::Unconfigured, &llm);
    state.debug_log.append("EXCEPTION calling genai generate_content: boom");
    let router = create_router(state, &ServerConfig::default());

    let (status, body) = send(router, get("/api/debug")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("debug"));
    assert_eq!(body["gemini_api_key"], json!("configured"));
    assert_eq!(body["openai_api_key"], json!("configured"));
    assert_eq!(body["fallback_chain"], json!(["Gemini", "OpenAI"]));
    assert!(
        body["last_error"]
            .as_str()
            .unwrap()
            .ends_with("EXCEPTION calling genai generate_content: boom")
    );
}

#[tokio::test]
async fn test_debug_status_without_keys() {
    let dir = TempDir::new().unwrap();
    let (_, body) = send(app(&dir, ProviderRoute::Unconfigured), get("/api/debug")).await;
    assert_eq!(body["gemini_api_key"], json!("missing"));
    assert_eq!(body["openai_api_key"], json!("missing"));
    assert_eq!(body["fallback_chain"], json!(["Gemini", "Mock"]));
    assert_eq!(body["last_error"], Value::Null);
}

#[tokio::test]
async fn test_models_without_key_offers_mock_entry() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(app(&dir, ProviderRoute::Unconfigured), get("/api/models")).await;
    assert_eq!(status, StatusCode::OK);

    let models = body["models"].as_array().unwrap();
    assert_eq!(models[0]["value"], json!("gemini-2.0-flash"));
    assert!(models[0]["label"].as_str().unwrap().contains("mock"));
}

#[tokio::test]
async fn test_models_with_key_reports_detected_model() {
    let dir = TempDir::new().unwrap();
    let llm = LlmConfig {
        gemini_api_key: Some("key".to_string()),
        ..LlmConfig::default()
    };
    let router = create_router(
        test_state(&dir, ProviderRoute::Unconfigured, &llm),
        &ServerConfig::default(),
    );

    let (_, body) = send(router, get("/api/models")).await;
    let models = body["models"].as_array().unwrap();
    assert_eq!(
        models[0],
        json!({"value": "gemini-2.0-flash", "label": "gemini-2.0-flash (Gemini, via API key)"})
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir, ProviderRoute::Unconfigured)
        .oneshot(get("/api/unknown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
