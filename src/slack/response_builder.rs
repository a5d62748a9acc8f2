//! Response-related utilities for Slack interactions.
//!
//! This module provides standardized ways to create and format
//! responses sent to Slack.

use serde_json::{Value, json};

/// Create a JSON payload for an ephemeral response
///
/// Ephemeral messages sent through `response_url` are only visible to the user
/// who triggered the command.
///
/// # Examples
///
/// ```
/// use recap::slack::response_builder::create_ephemeral_payload;
///
/// let payload = create_ephemeral_payload("This message is only visible to you");
/// assert_eq!(payload["response_type"], "ephemeral");
/// ```
#[must_use]
pub fn create_ephemeral_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "ephemeral"
    })
}

/// Create a JSON payload for a response visible to the whole channel.
#[must_use]
pub fn create_in_channel_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "in_channel"
    })
}
