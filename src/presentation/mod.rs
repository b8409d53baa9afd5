pub mod controllers;
pub mod middleware;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use controllers::{AppState, ProviderSettings};
pub use routes::create_router;
