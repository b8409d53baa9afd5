pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::analyze_code::{
    AnalyzeCodeRequest, AnalyzeCodeUseCase, AnalyzeError, ProviderRoute,
};
pub use domain::*;
pub use infrastructure::prompts;
pub use infrastructure::providers::{GeminiProvider, GenericProvider};
pub use infrastructure::resolver::{
    EndpointSource, ModelResolver, ResolvedEndpoint, extract_model_from_url,
};
