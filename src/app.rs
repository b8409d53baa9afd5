//! Application setup and wiring

use std::sync::Arc;

use axum::Router;
use codesentry_core::config::ServerConfig;
use codesentry_core::{Config, DebugLog, DetectedModelCache};
use tokio::net::TcpListener;
use codesentry_llm::{AnalyzeCodeUseCase, ModelResolver, ProviderRoute, ResolvedEndpoint};

use crate::presentation::{AppState, ProviderSettings, create_router};

/// Router plus what startup resolution decided
pub struct AppHandle {
    pub router: Router,
    pub endpoint: ResolvedEndpoint,
}

/// Resolve the model endpoint once and build the router around it.
pub async fn create_app(config: Config) -> AppHandle {
    let debug_log = DebugLog::new(config.storage.debug_log_file.clone());
    let model_cache = DetectedModelCache::new(config.storage.detected_model_file.clone());

    let endpoint = ModelResolver::new(config.llm.clone(), model_cache.clone())
        .resolve()
        .await;

    let route = ProviderRoute::from_config(&config.llm, &endpoint.url, &debug_log);
    tracing::info!(route = route.name(), "Analysis provider route selected");

    let state = AppState {
        settings: Arc::new(ProviderSettings::new(&config.llm, endpoint.url.clone())),
        analyze_code_use_case: Arc::new(AnalyzeCodeUseCase::new(route, debug_log.clone())),
        debug_log,
        model_cache,
    };

    AppHandle {
        router: create_router(state, &config.server),
        endpoint,
    }
}

/// Bind the configured host and port. The host may be a hostname.
pub async fn bind_listener(server: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port)).await
}
