//! API Routes
//!
//! HTTP endpoints for the application:
//! - `/api/chat` - Synchronous repurposing analysis
//! - `/api/chat/start`, `/api/chat/status/{job_id}` - Background jobs
//! - `/api/reports/{report_type}/{filename}` - Report downloads
//! - `/api/health` - Health checks
//! - `/` - Embedded chat UI

pub mod chat;
pub mod health;
pub mod reports;
pub mod ui;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router. API routes take precedence over the UI.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let api_router = Router::new()
        .merge(chat::router(state.clone()))
        .merge(reports::router(state.clone()))
        .merge(health::router(state));

    let app = Router::new()
        .merge(api_router)
        .merge(ui::router())
        .layer(TraceLayer::new_for_http());
    apply_cors(app)
}
