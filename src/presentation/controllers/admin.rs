//! Read-only introspection endpoints
//!
//! These endpoints are unauthenticated.

use axum::{Json, extract::State};

use codesentry_core::debug_log::RECENT_LINES;
use codesentry_llm::extract_model_from_url;

use crate::presentation::controllers::{AppState, ProviderSettings};
use crate::presentation::models::{
    AdminStatusResponse, DebugStatusResponse, ModelListResponse, ModelOption,
};

fn configured(set: bool) -> String {
    let status = if set { "configured" } else { "missing" };
    status.to_string()
}

/// GET /api/admin
pub async fn admin_status(State(state): State<AppState>) -> Json<AdminStatusResponse> {
    Json(AdminStatusResponse {
        gemini_api_key_set: state.settings.gemini_api_key_set,
        gemini_api_url: state.settings.gemini_api_url.clone(),
        detected_model_cache: state.model_cache.read(),
        recent_errors: state.debug_log.recent_exceptions(RECENT_LINES),
    })
}

/// GET /api/debug
pub async fn debug_status(State(state): State<AppState>) -> Json<DebugStatusResponse> {
    let settings = &state.settings;
    let fallback_chain = if settings.openai_api_key_set {
        vec!["Gemini".to_string(), "OpenAI".to_string()]
    } else {
        vec!["Gemini".to_string(), "Mock".to_string()]
    };

    Json(DebugStatusResponse {
        status: "debug".to_string(),
        gemini_api_key: configured(settings.gemini_api_key_set),
        gemini_api_url: settings.gemini_api_url.clone(),
        gemini_detected_model: state.model_cache.read(),
        openai_api_key: configured(settings.openai_api_key_set),
        last_error: state.debug_log.last_error(RECENT_LINES),
        fallback_chain,
    })
}

/// GET /api/models
pub async fn list_models(State(state): State<AppState>) -> Json<ModelListResponse> {
    let detected = extract_model_from_url(&state.settings.gemini_api_url)
        .or_else(|| state.model_cache.model());

    Json(ModelListResponse {
        models: available_models(&state.settings, detected),
    })
}

/// Dropdown entries: the key-derived entry first, then every candidate not
/// already listed.
pub fn available_models(settings: &ProviderSettings, detected: Option<String>) -> Vec<ModelOption> {
    let default_label = title_case(&settings.default_model);

    let first = match (settings.gemini_api_key_set, detected) {
        (true, Some(model)) => ModelOption {
            label: format!("{} (Gemini, via API key)", model),
            value: model,
        },
        (true, None) => ModelOption {
            value: settings.default_model.clone(),
            label: format!("{} (fallback, API key set)", default_label),
        },
        (false, _) => ModelOption {
            value: settings.default_model.clone(),
            label: format!("{} (mock; no API key)", default_label),
        },
    };

    let mut models = vec![first];
    for candidate in &settings.candidate_models {
        if models.iter().any(|m| &m.value == candidate) {
            continue;
        }
        models.push(ModelOption {
            value: candidate.clone(),
            label: format!("{} (Gemini)", title_case(candidate)),
        });
    }
    models
}

/// `gemini-2.5-flash` -> `Gemini 2.5 Flash`
fn title_case(model: &str) -> String {
    model
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
