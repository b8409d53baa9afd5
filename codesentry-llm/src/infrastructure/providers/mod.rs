pub mod gemini;
pub mod generic;

pub use gemini::GeminiProvider;
pub use generic::GenericProvider;
