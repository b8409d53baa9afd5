//! Route definitions and server setup

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use codesentry_core::config::ServerConfig;

use crate::presentation::{
    controllers::{
        AppState,
        admin::{admin_status, debug_status, list_models},
        analysis::analyze_code,
        health::{favicon, health_check},
    },
    middleware::logging_middleware,
};

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(origin_header) => Some(origin_header),
                Err(_) => {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600))
}

/// Create the application router with its middleware stack
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/analyze", post(analyze_code))
        .route("/admin", get(admin_status))
        .route("/models", get(list_models))
        .route("/debug", get(debug_status));

    let health_routes = Router::new()
        .route("/health", get(health_check))
        .route("/favicon.ico", get(favicon));

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            logging_middleware,
        ));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(service_builder)
        .with_state(app_state)
}
