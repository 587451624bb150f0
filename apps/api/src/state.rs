use std::sync::Arc;

use tokio::sync::RwLock;

use crate::blueprint::feedback::FeedbackSink;
use crate::blueprint::models::Blueprint;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable feedback sink. Default: LogFeedbackSink (local acknowledgement only).
    pub feedback_sink: Arc<dyn FeedbackSink>,
    /// The blueprint from the last successful generation, if any.
    /// Overlapping generations are not serialized: the last one to finish wins.
    pub current: Arc<RwLock<Option<Blueprint>>>,
}

impl AppState {
    pub fn new(llm: LlmClient, feedback_sink: Arc<dyn FeedbackSink>) -> Self {
        Self {
            llm,
            feedback_sink,
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn current_blueprint(&self) -> Option<Blueprint> {
        self.current.read().await.clone()
    }

    pub async fn set_current(&self, blueprint: Option<Blueprint>) {
        *self.current.write().await = blueprint;
    }
}

/// State wired to a mock generative API at `api_url`, logging feedback only.
#[cfg(test)]
pub(crate) fn test_state(api_url: &str) -> AppState {
    use crate::blueprint::feedback::LogFeedbackSink;

    let llm = LlmClient::new("test-key".to_string(), api_url.to_string());
    AppState::new(llm, Arc::new(LogFeedbackSink))
}
