//! Feedback — pluggable sink for operator approval/disapproval of generated items.
//!
//! Default: `LogFeedbackSink`, a local-only acknowledgement through `tracing`.
//! `AppState` holds an `Arc<dyn FeedbackSink>`, so an external sink can be
//! swapped in at startup without touching handlers. Feedback never alters the
//! blueprint and does not influence later generations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::blueprint::models::Section;
use crate::errors::AppError;
use crate::state::AppState;

/// Coordinates of one item inside the current blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackTarget {
    pub section: Section,
    pub index: usize,
}

/// One piece of feedback, as handed to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEvent {
    pub job_title: String,
    pub section: Section,
    pub index: usize,
    pub item: String,
    pub positive: bool,
    pub recorded_at: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn kind(&self) -> &'static str {
        if self.positive {
            "positive"
        } else {
            "negative"
        }
    }
}

/// What the operator is shown after feedback is recorded.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackAck {
    pub target: FeedbackTarget,
    pub item: String,
    pub positive: bool,
    pub message: String,
}

#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn record(&self, event: &FeedbackEvent) -> Result<(), AppError>;
}

pub struct LogFeedbackSink;

#[async_trait]
impl FeedbackSink for LogFeedbackSink {
    async fn record(&self, event: &FeedbackEvent) -> Result<(), AppError> {
        info!(
            "{} feedback received for {} - {}[{}]: \"{}\"",
            event.kind(),
            event.job_title,
            event.section,
            event.index,
            event.item
        );
        Ok(())
    }
}

/// Records feedback on `section[index]` of the current blueprint.
///
/// Fails with `NoBlueprint` when nothing has been generated and `NotFound`
/// when the index is out of range.
pub async fn record_feedback(
    state: &AppState,
    section: Section,
    index: usize,
    positive: bool,
) -> Result<FeedbackAck, AppError> {
    let event = {
        let current = state.current.read().await;
        let blueprint = current.as_ref().ok_or(AppError::NoBlueprint)?;
        let item = blueprint.item(section, index).ok_or_else(|| {
            AppError::NotFound(format!(
                "{section}[{index}] (section has {} item(s))",
                blueprint.items(section).len()
            ))
        })?;

        FeedbackEvent {
            job_title: blueprint.job_title.clone(),
            section,
            index,
            item: item.to_string(),
            positive,
            recorded_at: Utc::now(),
        }
    };

    state.feedback_sink.record(&event).await?;

    Ok(FeedbackAck {
        target: FeedbackTarget { section, index },
        message: format!(
            "Thank you for your {} feedback on: \"{}\"",
            event.kind(),
            event.item
        ),
        item: event.item,
        positive,
    })
}
