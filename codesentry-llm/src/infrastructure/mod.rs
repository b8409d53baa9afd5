pub mod prompts;
pub mod providers;
pub mod resolver;
