//! Axum route handlers for the Blueprint JSON API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::blueprint::export::{content_disposition, export_current, DOCX_CONTENT_TYPE};
use crate::blueprint::feedback::{record_feedback, FeedbackAck};
use crate::blueprint::generator::generate_blueprint;
use crate::blueprint::models::{Blueprint, Section};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub job_title: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub section: Section,
    pub index: usize,
    pub positive: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/blueprints
///
/// Generates a blueprint for the job title and makes it the current one.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Blueprint>, AppError> {
    let blueprint = generate_blueprint(&state, &request.job_title).await?;
    Ok(Json(blueprint))
}

/// GET /api/v1/blueprints/current
pub async fn handle_get_current(
    State(state): State<AppState>,
) -> Result<Json<Blueprint>, AppError> {
    let blueprint = state.current_blueprint().await.ok_or(AppError::NoBlueprint)?;
    Ok(Json(blueprint))
}

/// POST /api/v1/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackAck>, AppError> {
    let ack = record_feedback(&state, request.section, request.index, request.positive).await?;
    Ok(Json(ack))
}

/// GET /api/v1/blueprints/current/document
///
/// Returns the current blueprint as a DOCX attachment.
pub async fn handle_download(State(state): State<AppState>) -> Result<Response, AppError> {
    let (filename, bytes) = export_current(&state).await?;
    Ok(docx_attachment(&filename, bytes))
}

pub fn docx_attachment(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(filename)),
        ],
        bytes,
    )
        .into_response()
}
