//! CodeSentry - HTTP backend library
//!
//! Wires configuration, model resolution and the analysis use case into an
//! axum router.

mod app;
pub mod presentation;

pub use app::{AppHandle, bind_listener, create_app};
pub use codesentry_core::{Config, init_tracing};
pub use presentation::{AppState, ProviderSettings, create_router};

pub use codesentry_core;
pub use codesentry_llm;
