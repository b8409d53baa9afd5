pub mod analyze_code;

pub use analyze_code::AnalyzeCodeUseCase;
