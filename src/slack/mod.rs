//! All Slack-specific functionality

pub mod bot;
pub mod client;
pub mod command_parser;
pub mod message_formatter;
pub mod response_builder;

// Re-export main types for convenience
pub use bot::SlackBot;
pub use client::SlackClient;
pub use command_parser::{SlackCommandEvent, parse_form_data};
