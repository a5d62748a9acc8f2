#![allow(clippy::missing_errors_doc)]
use lambda_runtime::{Error, LambdaEvent};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{error, info};

use super::{deliver, summarize};
use crate::core::config::AppConfig;
use crate::core::models::ProcessingTask;
use crate::errors::SlackError;
use crate::slack::SlackBot;

/// Pull every `ProcessingTask` out of an SQS event.
pub fn parse_sqs_tasks(payload: &Value) -> Result<Vec<ProcessingTask>, Error> {
    let records = payload
        .get("Records")
        .and_then(|records| records.as_array())
        .ok_or_else(|| Error::from("SQS event has no Records"))?;

    records
        .iter()
        .map(|record| {
            let body = record
                .get("body")
                .and_then(|body| body.as_str())
                .ok_or_else(|| Error::from("Failed to extract SQS message body"))?;
            serde_json::from_str(body).map_err(|e| {
                Error::from(format!(
                    "Failed to parse SQS message body into ProcessingTask: {}",
                    e
                ))
            })
        })
        .collect()
}

async fn process_task(
    slack_bot: &SlackBot,
    http_client: &HttpClient,
    config: &AppConfig,
    task: &ProcessingTask,
) -> Result<(), SlackError> {
    info!(
        "Processing task {} for user {}",
        task.correlation_id, task.user_id
    );

    let payload = match summarize::summarize_task(slack_bot, config, task).await {
        Ok(result) => deliver::reply_for(task, &result),
        Err(e) => {
            error!(
                "Failed to generate summary (correlation_id={}): {}",
                task.correlation_id, e
            );
            deliver::error_reply(&e)
        }
    };

    deliver::deliver(http_client, task, &payload).await
}

/// Lambda handler for the Worker entrypoint. Parses SQS messages, summarizes, and delivers.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<(), Error> {
    let config = AppConfig::from_env().map_err(|e| {
        let err = SlackError::ConfigError(e);
        error!("{}", err);
        Error::from(err)
    })?;

    let tasks = parse_sqs_tasks(&event.payload)?;
    info!("Worker received {} task(s)", tasks.len());

    let slack_bot = SlackBot::new(&config)
        .map_err(|e| Error::from(format!("Failed to initialize bot: {}", e)))?;
    let http_client = HttpClient::new();

    // Delivery failures are logged; the batch still succeeds.
    for task in &tasks {
        if let Err(e) = process_task(&slack_bot, &http_client, &config, task).await {
            error!(
                "Delivery error (correlation_id={}): {}",
                task.correlation_id, e
            );
        }
    }

    Ok(())
}

pub use self::function_handler as handler;
