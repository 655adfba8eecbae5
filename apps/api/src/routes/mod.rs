pub mod health;


use axum::{
    routing::{get, post},
    Router,
};

use crate::consent::handlers as consent;
use crate::documents::handlers as documents;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(consent::handle_options))
        // Sessions and history
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route("/api/v1/sessions/:id/history", get(session::handle_history))
        .route(
            "/api/v1/sessions/:id/history/:index/export",
            get(session::handle_export),
        )
        // Workflows
        .route("/api/v1/sessions/:id/generate", post(consent::handle_generate))
        .route("/api/v1/sessions/:id/analyze", post(consent::handle_analyze))
        .route("/api/v1/sessions/:id/insights", post(consent::handle_insights))
        // Uploads
        .route("/api/v1/documents/extract", post(documents::handle_extract))
        .with_state(state)
}
