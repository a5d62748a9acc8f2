//! Summarization backends.
//!
//! A backend turns a block of text into a shorter one within the requested
//! bounds. Backends report failures as [`BackendError`]; turning those into
//! user-facing text is the job of [`super::client::SummarizationClient`].

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::core::config::SummarizerConfig;

/// Length bounds passed through to the model, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub max_len: u32,
    pub min_len: u32,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Inference endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Inference endpoint returned no summary")]
    EmptyResponse,

    #[error("Failed to decode inference response: {0}")]
    Malformed(String),

    #[error("Inference request failed: {0}")]
    Transport(String),

    #[error("Inference request timed out")]
    Timeout,
}

impl BackendError {
    /// Whether the endpoint answered but with something unusable, as opposed to
    /// the request itself failing.
    #[must_use]
    pub fn is_bad_response(&self) -> bool {
        matches!(self, BackendError::Status { .. } | BackendError::EmptyResponse)
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            BackendError::Timeout
        } else if error.is_decode() {
            BackendError::Malformed(error.to_string())
        } else {
            BackendError::Transport(error.to_string())
        }
    }
}

#[async_trait]
pub trait SummaryBackend: Send + Sync {
    /// Summarize `text` within `bounds`. Implementations must decode deterministically.
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, BackendError>;
}

/// Pull the first `summary_text` out of an inference response.
///
/// Anything other than a non-empty list counts as an empty answer; a list whose
/// first item carries no `summary_text` string is malformed.
fn first_summary(body: &Value) -> Result<String, BackendError> {
    let Some(first) = body.as_array().and_then(|items| items.first()) else {
        debug!("Inference endpoint returned no summary items");
        return Err(BackendError::EmptyResponse);
    };

    first
        .get("summary_text")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| BackendError::Malformed("first item has no summary_text".to_string()))
}

/// Hosted inference backend speaking the Hugging Face summarization protocol.
pub struct HuggingFaceBackend {
    http: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl HuggingFaceBackend {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the token is not a
    /// valid header value.
    pub fn new(config: &SummarizerConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build HTTP client: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = config.api_token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| BackendError::Transport(format!("Invalid Authorization header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            headers,
        })
    }
}

#[async_trait]
impl SummaryBackend for HuggingFaceBackend {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, BackendError> {
        let request_body = json!({
            "inputs": text,
            "parameters": {
                "max_length": bounds.max_len,
                "min_length": bounds.min_len,
                "do_sample": false
            }
        });

        #[cfg(feature = "debug-logs")]
        debug!("Summarization input:\n{}", text);

        #[cfg(not(feature = "debug-logs"))]
        debug!(
            "Summarization input: {} chars [... content masked, enable debug-logs feature to view ...]",
            text.chars().count()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        first_summary(&body)
    }
}
