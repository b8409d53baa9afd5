//! CodeSentry Core - shared foundation for the CodeSentry crates
//!
//! # Modules
//!
//! - [`config`]: Strongly-typed configuration with TOML and environment variable support
//! - [`logging`]: Structured logging with tracing
//! - [`debug_log`]: Append-only provider debug log read back by the admin endpoints
//! - [`model_cache`]: One-line cache of the model id detected at startup
//! - [`mock`]: Deterministic placeholder analysis
//!
//! # Configuration
//!
//! ```rust,ignore
//! use codesentry_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `CODESENTRY__` prefix with double underscore
//! separators. Provider credentials keep their conventional names:
//!
//! ```bash
//! CODESENTRY__SERVER__PORT=8000
//! GEMINI_API_KEY=...
//! GEMINI_API_URL=https://my-proxy.example.com/generate
//! ```

pub mod config;
pub mod debug_log;
pub mod logging;
pub mod mock;
pub mod model_cache;

pub use config::Config;
pub use debug_log::DebugLog;
pub use logging::init_tracing;
pub use mock::{MockAnalysis, build_mock_analysis};
pub use model_cache::DetectedModelCache;
