// Pharma Agentic - multi-agent drug repurposing analysis service

pub mod agents;
pub mod config;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod queue;
pub mod reports;
pub mod routes;
pub mod tools;
pub mod types;
pub mod utils;
pub mod workflow;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
// Note: Import specific items from types module instead of glob to avoid name conflicts
// e.g., use pharma_agentic::types::{LLMRequest, LLMResponse, AppResult};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
