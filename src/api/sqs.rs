use anyhow::Context;
use aws_sdk_sqs::Client as SqsClient;

use crate::core::{config::AppConfig, models::ProcessingTask};
use crate::errors::SlackError;

async fn send_message(task: &ProcessingTask, queue_url: &str) -> anyhow::Result<()> {
    let message_body = serde_json::to_string(task).context("Failed to serialize task")?;

    let shared_config = aws_config::from_env().load().await;
    let client = SqsClient::new(&shared_config);
    client
        .send_message()
        .queue_url(queue_url)
        .message_body(message_body)
        .send()
        .await
        .with_context(|| format!("Failed to send message to SQS queue {queue_url}"))?;
    Ok(())
}

/// # Errors
///
/// Returns an error if serialization fails or the message cannot be sent to SQS.
pub async fn send_to_sqs(task: &ProcessingTask, config: &AppConfig) -> Result<(), SlackError> {
    send_message(task, &config.processing_queue_url)
        .await
        .map_err(|e| SlackError::aws(&e))
}
