#![allow(clippy::missing_errors_doc)]
use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;
use tracing::{info, warn};

use crate::ai::HierarchicalReducer;
use crate::collect::label_messages;
use crate::core::config::AppConfig;
use crate::core::models::{ProcessingTask, TaskSource};
use crate::errors::SlackError;
use crate::slack::SlackBot;
use crate::slack::command_parser::sections_to_messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeResult {
    /// A summary and how many input units went into it.
    Summary { text: String, processed: usize },
    /// Nothing to summarize in the requested window.
    NoMessages,
    /// The pipeline did not finish within the deadline.
    TimedOut,
}

/// Run the reducer under an overall deadline. On expiry the work is dropped;
/// nothing partial is returned.
pub async fn summarize_with_timeout(
    reducer: &HierarchicalReducer,
    messages: &[String],
    detail: Option<&str>,
    deadline: Duration,
) -> SummarizeResult {
    if messages.is_empty() {
        return SummarizeResult::NoMessages;
    }

    match tokio::time::timeout(deadline, reducer.summarize(messages, detail)).await {
        Ok(text) => SummarizeResult::Summary {
            text,
            processed: messages.len(),
        },
        Err(_) => {
            warn!(
                "Summarizing {} messages exceeded {:?}",
                messages.len(),
                deadline
            );
            SummarizeResult::TimedOut
        }
    }
}

/// Fetch, filter and label the channel's recent history.
pub async fn collect_messages(
    slack_bot: &SlackBot,
    config: &AppConfig,
    channel_id: &str,
    hours: u32,
) -> Result<Vec<String>, SlackError> {
    let oldest = Utc::now() - ChronoDuration::hours(i64::from(hours));
    let bot_user_id = slack_bot.slack_client().get_bot_user_id().await.ok();
    let messages = slack_bot
        .slack_client()
        .get_user_messages_since(channel_id, oldest, bot_user_id.as_deref(), config.max_messages)
        .await?;
    info!(
        "Collected {} user messages for summarization",
        messages.len()
    );

    let names = slack_bot.slack_client().resolve_user_names(&messages).await;
    Ok(label_messages(&messages, &names))
}

pub async fn summarize_task(
    slack_bot: &SlackBot,
    config: &AppConfig,
    task: &ProcessingTask,
) -> Result<SummarizeResult, SlackError> {
    let messages = match &task.source {
        TaskSource::ChannelHistory { hours } => {
            collect_messages(slack_bot, config, &task.channel_id, *hours).await?
        }
        TaskSource::PastedText { sections } => sections_to_messages(sections),
    };

    Ok(summarize_with_timeout(
        slack_bot.reducer(),
        &messages,
        task.detail.as_deref(),
        config.summary_timeout,
    )
    .await)
}
