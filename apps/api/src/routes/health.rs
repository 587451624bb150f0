use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether a blueprint is currently loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let current = state.current_blueprint().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "blueprint",
        "blueprint_loaded": current.is_some(),
    }))
}
