//! Blueprint generation: builds the prompt, calls Gemini, extracts the JSON object
//! and validates its shape.

use tracing::{info, warn};

use crate::blueprint::models::Blueprint;
use crate::blueprint::prompts::build_blueprint_prompt;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::state::AppState;

pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a job title.";

/// Requests a blueprint for `job_title` from the LLM. No retries.
pub async fn request_blueprint(job_title: &str, llm: &LlmClient) -> Result<Blueprint, LlmError> {
    let prompt = build_blueprint_prompt(job_title);
    let value = llm.call_json(&prompt).await.inspect_err(|e| {
        warn!("Blueprint request for '{job_title}' failed: {e}");
    })?;
    let blueprint = Blueprint::from_value(&value).inspect_err(|e| {
        warn!("Blueprint for '{job_title}' rejected: {e}");
    })?;
    Ok(blueprint)
}

/// Generates a blueprint and makes it the current one.
///
/// An empty title is rejected before any API call. The current blueprint is
/// only ever replaced by a successful generation.
pub async fn generate_blueprint(state: &AppState, job_title: &str) -> Result<Blueprint, AppError> {
    let job_title = job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation(EMPTY_TITLE_MESSAGE.to_string()));
    }

    info!("Generating blueprint for '{job_title}'");

    let blueprint = request_blueprint(job_title, &state.llm).await?;
    info!(
        "Blueprint ready: {} responsibilities, {} skills, {} qualifications",
        blueprint.responsibilities.len(),
        blueprint.required_skills.len(),
        blueprint.qualifications.len()
    );
    state.set_current(Some(blueprint.clone())).await;
    Ok(blueprint)
}
