//! Handler for the `/summarize` and `/summarize_text` slash commands.

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::cooldown::Cooldown;
use super::helpers::ok_ephemeral;
use super::parsing::parse_slack_event;
use super::sqs;
use crate::core::config::AppConfig;
use crate::core::models::{ProcessingTask, TaskSource};
use crate::errors::SlackError;
use crate::slack::SlackCommandEvent;
use crate::slack::command_parser::{parse_history_options, parse_pasted_text};
use crate::slack::message_formatter::{NOTHING_TO_SUMMARIZE, cooldown_message, usage_message};

pub const SUMMARIZE_COMMAND: &str = "/summarize";
pub const SUMMARIZE_TEXT_COMMAND: &str = "/summarize_text";

static COOLDOWN: OnceCell<Cooldown> = OnceCell::new();

/// What to do with an incoming command.
#[derive(Debug)]
pub enum CommandPlan {
    /// Answer right away, nothing is queued.
    Reply(String),
    /// Queue the task for the worker.
    Enqueue(ProcessingTask),
}

/// Decide how to handle a parsed command. Accepted commands count against the
/// user's cooldown; rejected ones do not.
pub fn plan_command(event: &SlackCommandEvent, cooldown: &Cooldown) -> CommandPlan {
    let (source, detail) = match event.command.as_str() {
        SUMMARIZE_COMMAND => {
            let options = parse_history_options(&event.text);
            (
                TaskSource::ChannelHistory {
                    hours: options.hours,
                },
                options.detail,
            )
        }
        SUMMARIZE_TEXT_COMMAND => {
            let options = parse_pasted_text(&event.text);
            if options.sections.is_empty() {
                return CommandPlan::Reply(NOTHING_TO_SUMMARIZE.to_string());
            }
            (
                TaskSource::PastedText {
                    sections: options.sections,
                },
                options.detail,
            )
        }
        other => return CommandPlan::Reply(usage_message(other)),
    };

    if !cooldown.try_acquire(&event.user_id) {
        info!("User {} is still cooling down", event.user_id);
        return CommandPlan::Reply(cooldown_message(cooldown.window().as_secs()));
    }

    CommandPlan::Enqueue(ProcessingTask {
        correlation_id: Uuid::new_v4().to_string(),
        user_id: event.user_id.clone(),
        channel_id: event.channel_id.clone(),
        response_url: Some(event.response_url.clone()).filter(|u| !u.is_empty()),
        source,
        detail,
    })
}

/// Handle a slash command from Slack.
///
/// # Errors
/// Returns an error if the body cannot be parsed.
pub async fn handle_slash_command(config: &AppConfig, body: &str) -> Result<Value, SlackError> {
    let slack_event = parse_slack_event(body)?;
    let cooldown = COOLDOWN.get_or_init(|| Cooldown::new(config.command_cooldown));

    let task = match plan_command(&slack_event, cooldown) {
        CommandPlan::Reply(text) => return Ok(ok_ephemeral(&text)),
        CommandPlan::Enqueue(task) => task,
    };

    info!(
        "Queueing {} for user {} (correlation_id={})",
        slack_event.command, task.user_id, task.correlation_id
    );

    if let Err(e) = sqs::send_to_sqs(&task, config).await {
        error!(
            "Failed to enqueue task (correlation_id={}): {}",
            task.correlation_id, e
        );
        return Ok(ok_ephemeral(&format!(
            "Failed to start summarization. Please try again. (ref: {})",
            &task.correlation_id[..8]
        )));
    }

    Ok(ok_ephemeral("✨ Summarizing... You'll receive the summary shortly."))
}
