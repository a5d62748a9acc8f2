#![allow(clippy::missing_errors_doc)]
use reqwest::Client as HttpClient;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{error, info};

use super::CANONICAL_FAILURE_MESSAGE;
use super::summarize::SummarizeResult;
use crate::core::models::{ProcessingTask, TaskSource};
use crate::errors::SlackError;
use crate::slack::message_formatter::{
    ACCESS_DENIED, HISTORY_TIMEOUT, NO_MESSAGES_IN_WINDOW, TEXT_TIMEOUT, format_summary_message,
};
use crate::slack::response_builder::{create_ephemeral_payload, create_in_channel_payload};

/// Reply payload for a finished task. Summaries go to the channel; every other
/// outcome is only shown to the requester.
#[must_use]
pub fn reply_for(task: &ProcessingTask, result: &SummarizeResult) -> Value {
    match result {
        SummarizeResult::Summary { text, processed } => create_in_channel_payload(
            &format_summary_message(text, *processed, task.unit_label()),
        ),
        SummarizeResult::NoMessages => create_ephemeral_payload(NO_MESSAGES_IN_WINDOW),
        SummarizeResult::TimedOut => create_ephemeral_payload(match task.source {
            TaskSource::ChannelHistory { .. } => HISTORY_TIMEOUT,
            TaskSource::PastedText { .. } => TEXT_TIMEOUT,
        }),
    }
}

/// Reply payload for a task that failed before summarizing.
#[must_use]
pub fn error_reply(error: &SlackError) -> Value {
    if error.is_access_denied() {
        create_ephemeral_payload(ACCESS_DENIED)
    } else {
        create_ephemeral_payload(CANONICAL_FAILURE_MESSAGE)
    }
}

pub async fn send_response_url(
    http_client: &HttpClient,
    response_url: &str,
    payload: &Value,
) -> Result<(), SlackError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let resp = http_client
        .post(response_url)
        .headers(headers)
        .json(payload)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body_text = resp
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        error!(
            "response_url POST failed: status={} body={}",
            status, body_text
        );
        return Err(SlackError::HttpError(format!(
            "response_url returned status {status}"
        )));
    }
    Ok(())
}

/// Post `payload` back to the command's `response_url`, if it has one.
pub async fn deliver(
    http_client: &HttpClient,
    task: &ProcessingTask,
    payload: &Value,
) -> Result<(), SlackError> {
    let Some(response_url) = task.response_url.as_deref() else {
        info!(
            "Task {} has no response_url, dropping reply",
            task.correlation_id
        );
        return Ok(());
    };
    send_response_url(http_client, response_url, payload).await?;
    info!("Delivered reply for task {}", task.correlation_id);
    Ok(())
}
