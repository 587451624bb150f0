//! Server-rendered operator pages. Every action re-renders the whole page, so
//! prior output is replaced and the download link reflects the current state.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::blueprint::export::export_current;
use crate::blueprint::feedback::record_feedback;
use crate::blueprint::generator::generate_blueprint;
use crate::blueprint::handlers::docx_attachment;
use crate::blueprint::models::Section;
use crate::blueprint::page::{render_page, Output, PageView};
use crate::blueprint::render::{render, render_with_feedback};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub job_title: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub section: String,
    pub index: usize,
    pub positive: bool,
}

fn page(status: StatusCode, view: &PageView) -> Response {
    (status, Html(render_page(view))).into_response()
}

/// Page showing the current blueprint, if any.
async fn current_view(state: &AppState) -> PageView {
    match state.current_blueprint().await {
        Some(blueprint) => PageView {
            job_title: blueprint.job_title.clone(),
            notice: None,
            output: Output::Table(render(&blueprint)),
            download_available: true,
        },
        None => PageView::empty(),
    }
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Response {
    page(StatusCode::OK, &current_view(&state).await)
}

/// POST /generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Response {
    let (status, output, download_available) =
        match generate_blueprint(&state, &form.job_title).await {
            Ok(blueprint) => (StatusCode::OK, Output::Table(render(&blueprint)), true),
            Err(e) => {
                e.log();
                let output = Output::from_error("Error generating blueprint", &e);
                (e.status(), output, false)
            }
        };

    let view = PageView {
        job_title: form.job_title,
        notice: None,
        output,
        download_available,
    };
    page(status, &view)
}

/// POST /feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> Response {
    let result = match form.section.parse::<Section>() {
        Ok(section) => record_feedback(&state, section, form.index, form.positive).await,
        Err(e) => Err(AppError::Validation(e.to_string())),
    };

    let mut view = current_view(&state).await;
    match result {
        Ok(ack) => {
            if let Some(blueprint) = state.current_blueprint().await {
                view.output = Output::Table(render_with_feedback(&blueprint, Some(&ack.target)));
            }
            view.notice = Some(ack.message);
            page(StatusCode::OK, &view)
        }
        Err(e) => {
            e.log();
            if matches!(view.output, Output::Table(_)) {
                view.notice = Some(format!("Error recording feedback: {e}"));
            } else {
                view.output = Output::from_error("Error recording feedback", &e);
            }
            page(e.status(), &view)
        }
    }
}

/// GET /download
pub async fn handle_download(State(state): State<AppState>) -> Response {
    match export_current(&state).await {
        Ok((filename, bytes)) => docx_attachment(&filename, bytes),
        Err(e) => {
            e.log();
            let mut view = current_view(&state).await;
            view.output = Output::from_error("Error exporting blueprint", &e);
            page(e.status(), &view)
        }
    }
}
