use std::sync::Arc;

use super::client::SlackClient;
use crate::ai::{FixedDelay, HierarchicalReducer, HuggingFaceBackend, SummarizationClient};
use crate::core::config::AppConfig;
use crate::errors::SlackError;

/// The worker's collaborators: Slack for reading history, the reducer for
/// summarizing it.
pub struct SlackBot {
    slack_client: SlackClient,
    reducer: HierarchicalReducer,
}

impl SlackBot {
    /// Construct a `SlackBot` from configuration, wiring the hosted inference
    /// backend and the configured map-phase pacing into the reducer.
    ///
    /// # Errors
    ///
    /// Returns an error if the inference backend's HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, SlackError> {
        let slack_client = SlackClient::new(config.slack_bot_token.clone());
        let backend = HuggingFaceBackend::new(&config.summarizer_config())?;
        let reducer = HierarchicalReducer::new(SummarizationClient::new(Arc::new(backend)))
            .with_pacer(Arc::new(FixedDelay(config.map_delay)));

        Ok(Self::with_parts(slack_client, reducer))
    }

    #[must_use]
    pub fn with_parts(slack_client: SlackClient, reducer: HierarchicalReducer) -> Self {
        Self {
            slack_client,
            reducer,
        }
    }

    #[must_use]
    pub fn slack_client(&self) -> &SlackClient {
        &self.slack_client
    }

    #[must_use]
    pub fn reducer(&self) -> &HierarchicalReducer {
        &self.reducer
    }
}
