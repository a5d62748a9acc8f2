use slack_morphism::errors::SlackClientError;
use thiserror::Error;

use crate::ai::BackendError;

/// Slack error codes meaning the bot may not read the requested conversation.
const ACCESS_DENIED_CODES: [&str; 4] = [
    "not_in_channel",
    "channel_not_found",
    "missing_scope",
    "access_denied",
];

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to access summarization backend: {0}")]
    SummarizerError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl SlackError {
    /// Whether Slack refused access to the conversation.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        match self {
            SlackError::ApiError(msg) => ACCESS_DENIED_CODES.iter().any(|code| msg.contains(code)),
            _ => false,
        }
    }
}

impl From<SlackClientError> for SlackError {
    fn from(error: SlackClientError) -> Self {
        SlackError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::HttpError(error.to_string())
    }
}

impl SlackError {
    /// Wrap an AWS failure, keeping its whole context chain in the message.
    #[must_use]
    pub fn aws(error: &anyhow::Error) -> Self {
        SlackError::AwsError(format!("{error:#}"))
    }
}

impl From<BackendError> for SlackError {
    fn from(error: BackendError) -> Self {
        SlackError::SummarizerError(error.to_string())
    }
}
