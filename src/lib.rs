//! recap - A Slack bot that condenses recent channel chatter (or pasted text)
//! into a short summary using a hosted summarization model.
//!
//! This crate implements a two-Lambda architecture:
//! 1. An API Lambda that verifies `/summarize` and `/summarize_text` slash
//!    commands, applies the per-user cooldown, then queues tasks
//! 2. A Worker Lambda that collects messages, runs the map-reduce summarizer
//!    under an overall deadline, and replies through the command's `response_url`
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - SQS for task queuing between Lambdas
//! - slack-morphism for Slack API interactions
//! - reqwest against a Hugging Face style inference endpoint for summarization
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use recap::ai::{FixedDelay, HierarchicalReducer, HuggingFaceBackend, SummarizationClient};
//! use recap::core::config::SummarizerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     recap::setup_logging();
//!
//!     let backend = HuggingFaceBackend::new(&SummarizerConfig {
//!         endpoint: recap::core::config::DEFAULT_HF_API_URL.to_string(),
//!         api_token: std::env::var("HF_TOKEN").ok(),
//!         request_timeout: Duration::from_secs(30),
//!     })?;
//!     let reducer = HierarchicalReducer::new(SummarizationClient::new(Arc::new(backend)))
//!         .with_pacer(Arc::new(FixedDelay(Duration::from_millis(500))));
//!
//!     let messages = vec![
//!         "alice: let's ship v2 tomorrow".to_string(),
//!         "bob: need tests first".to_string(),
//!         "alice: ok I'll write them tonight".to_string(),
//!     ];
//!     let summary = reducer.summarize(&messages, Some("short")).await;
//!     println!("{summary}\n\n_(processed {} messages)_", messages.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod collect;
pub mod core;
pub mod errors;
pub mod slack;
pub mod worker;

pub use errors::SlackError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Log level comes from `RUST_LOG`, defaulting to `info`. Calling this more
/// than once is harmless.
///
/// # Example
///
/// ```
/// recap::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
