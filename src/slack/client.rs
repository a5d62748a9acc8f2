//! Slack API client module
//!
//! Encapsulates the Slack Web API calls the worker needs: reading channel
//! history and resolving user names, with retry logic and error handling.

use chrono::{DateTime, Utc};
use slack_morphism::events::SlackMessageEventType;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{SlackApiConversationsHistoryRequest, SlackApiUsersInfoRequest};
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackCursorId, SlackHistoryMessage,
    SlackTs, SlackUserId,
};
use std::collections::HashMap;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use crate::collect::{HistoryPage, RawMessage, collect_user_messages};
use crate::errors::SlackError;

/// Largest page `conversations.history` accepts.
const HISTORY_PAGE_LIMIT: u16 = 200;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

fn slack_http() -> Result<&'static SlackHyperClient, SlackError> {
    SLACK_CLIENT
        .as_ref()
        .ok_or_else(|| SlackError::GeneralError("Slack HTTP connector not initialized".to_string()))
}

/// Slack `ts` value for a point in time.
#[must_use]
pub fn slack_ts_for(time: DateTime<Utc>) -> String {
    format!("{}.000000", time.timestamp())
}

impl From<&SlackHistoryMessage> for RawMessage {
    fn from(msg: &SlackHistoryMessage) -> Self {
        let is_system = msg.subtype.as_ref().is_some_and(|subtype| {
            matches!(
                subtype,
                SlackMessageEventType::ChannelJoin | SlackMessageEventType::ChannelLeave
            )
        });
        let is_bot = msg.sender.bot_id.is_some()
            || matches!(msg.subtype, Some(SlackMessageEventType::BotMessage));

        RawMessage {
            user_id: msg.sender.user.as_ref().map(|u| u.0.clone()),
            is_bot,
            is_system,
            ts: msg.origin.ts.0.parse::<f64>().unwrap_or(0.0),
            text: msg.content.text.clone().unwrap_or_default(),
        }
    }
}

/// Slack API client with retry logic and error handling
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    /// Retry transient failures with jittered exponential backoff. Permission
    /// errors are returned immediately.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, SlackError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, SlackError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);

        RetryIf::spawn(strategy, operation, |e: &SlackError| !e.is_access_denied()).await
    }

    /// # Errors
    pub async fn get_bot_user_id(&self) -> Result<String, SlackError> {
        self.with_retry(|| async {
            let session = slack_http()?.open_session(&self.token);
            let test_resp = session.auth_test().await?;
            Ok(test_resp.user_id.0)
        })
        .await
    }

    /// Display name for a user, falling back to the real name and then the id.
    ///
    /// # Errors
    pub async fn get_user_name(&self, user_id: &str) -> Result<String, SlackError> {
        self.with_retry(|| async {
            let session = slack_http()?.open_session(&self.token);
            let user_info_req = SlackApiUsersInfoRequest::new(SlackUserId(user_id.to_string()));

            match session.users_info(&user_info_req).await {
                Ok(info) => {
                    let profile = info.user.profile.as_ref();
                    let name = profile
                        .and_then(|p| p.display_name.clone())
                        .filter(|n| !n.trim().is_empty())
                        .or_else(|| profile.and_then(|p| p.real_name.clone()))
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or_else(|| user_id.to_string());
                    Ok(name)
                }
                Err(e) => {
                    warn!("Failed to fetch user info for {}: {:?}", user_id, e);
                    Ok(user_id.to_string())
                }
            }
        })
        .await
    }

    /// Resolve names for every distinct user, one lookup each.
    pub async fn resolve_user_names(&self, messages: &[RawMessage]) -> HashMap<String, String> {
        let mut names = HashMap::new();
        for user_id in messages.iter().filter_map(|m| m.user_id.as_deref()) {
            if names.contains_key(user_id) {
                continue;
            }
            let name = self
                .get_user_name(user_id)
                .await
                .unwrap_or_else(|_| user_id.to_string());
            names.insert(user_id.to_string(), name);
        }
        names
    }

    /// User messages newer than `oldest`, oldest first. Follows pagination until
    /// `max_messages` user messages were read or the history ends.
    ///
    /// # Errors
    pub async fn get_user_messages_since(
        &self,
        channel_id: &str,
        oldest: DateTime<Utc>,
        bot_user_id: Option<&str>,
        max_messages: usize,
    ) -> Result<Vec<RawMessage>, SlackError> {
        let oldest_ts = slack_ts_for(oldest);

        let messages = collect_user_messages(bot_user_id, max_messages, |cursor| {
            let oldest_ts = oldest_ts.clone();
            async move { self.history_page(channel_id, oldest_ts, cursor).await }
        })
        .await?;

        info!(
            "Kept {} user messages from channel {}",
            messages.len(),
            channel_id
        );
        Ok(messages)
    }

    async fn history_page(
        &self,
        channel_id: &str,
        oldest_ts: String,
        cursor: Option<String>,
    ) -> Result<HistoryPage, SlackError> {
        self.with_retry(|| {
            let cursor = cursor.clone();
            let oldest_ts = oldest_ts.clone();
            async move {
                let session = slack_http()?.open_session(&self.token);
                let mut request = SlackApiConversationsHistoryRequest::new()
                    .with_channel(SlackChannelId(channel_id.to_string()))
                    .with_limit(HISTORY_PAGE_LIMIT)
                    .with_oldest(SlackTs::new(oldest_ts));
                if let Some(c) = cursor {
                    request = request.with_cursor(SlackCursorId(c));
                }

                let result = session.conversations_history(&request).await?;
                let next_cursor = result
                    .response_metadata
                    .and_then(|m| m.next_cursor)
                    .map(|c| c.0)
                    .filter(|c| !c.is_empty());
                Ok(HistoryPage {
                    messages: result.messages.iter().map(RawMessage::from).collect(),
                    next_cursor,
                })
            }
        })
        .await
    }
}
