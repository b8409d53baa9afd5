pub mod error;
pub mod provider;

pub use error::LlmError;
pub use provider::{GenerationRequest, LlmProvider, ProviderInfo};
