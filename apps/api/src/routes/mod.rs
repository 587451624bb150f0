pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::blueprint::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Operator pages
        .route("/", get(pages::handle_index))
        .route("/generate", post(pages::handle_generate))
        .route("/feedback", post(pages::handle_feedback))
        .route("/download", get(pages::handle_download))
        // Blueprint JSON API
        .route("/api/v1/blueprints", post(handlers::handle_generate))
        .route(
            "/api/v1/blueprints/current",
            get(handlers::handle_get_current),
        )
        .route(
            "/api/v1/blueprints/current/document",
            get(handlers::handle_download),
        )
        .route("/api/v1/feedback", post(handlers::handle_feedback))
        .with_state(state)
}
