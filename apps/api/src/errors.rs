use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so JSON handlers can return `Result<T, AppError>`.
/// HTML handlers render the same errors into the page output area instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Please generate a blueprint first.")]
    NoBlueprint,

    #[error("{0}")]
    Generation(#[from] LlmError),

    #[error("Document export failed: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NoBlueprint => StatusCode::NOT_FOUND,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NoBlueprint => "NO_BLUEPRINT",
            AppError::Generation(e) => e.code(),
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Raw upstream text, present only for malformed-JSON generation failures.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AppError::Generation(e) => e.raw_response(),
            _ => None,
        }
    }

    /// Errors the operator caused (empty input, nothing generated yet) rather than failures.
    pub fn is_operator_notice(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NoBlueprint)
    }

    pub fn log(&self) {
        match self {
            AppError::Validation(_) | AppError::NotFound(_) | AppError::NoBlueprint => {
                tracing::warn!("{}: {self}", self.code());
            }
            AppError::Generation(e) => tracing::error!("Generation error: {e}"),
            AppError::Export(msg) => tracing::error!("Export error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let mut error = json!({
            "code": self.code(),
            "message": message,
        });
        if let Some(raw) = self.raw_response() {
            error["raw_response"] = json!(raw);
        }

        (self.status(), Json(json!({ "error": error }))).into_response()
    }
}
