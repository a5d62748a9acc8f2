//! Summarization client with truncation fallback.
//!
//! Wraps a [`SummaryBackend`] so callers always get text back: backend failures
//! are resolved here into a truncated copy of the input.

use std::sync::Arc;
use tracing::warn;

use super::backend::{BackendError, LengthBounds, SummaryBackend};

/// Inputs shorter than this are not worth a backend call.
pub const MIN_INPUT_CHARS: usize = 30;

/// Fallback ceiling when the endpoint answered with an unusable response.
pub const BAD_RESPONSE_CEILING: usize = 200;

/// Fallback ceiling when the request itself failed.
pub const TRANSPORT_CEILING: usize = 150;

const ELLIPSIS: &str = "...";

/// Keep `text` when it fits in `ceiling` characters, otherwise cut it so the
/// result including the ellipsis is exactly `ceiling` characters long.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, ceiling: usize) -> String {
    if text.chars().count() <= ceiling {
        return text.to_string();
    }
    let keep = ceiling.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Text substituted for a failed backend call.
fn fallback_for(text: &str, error: &BackendError) -> String {
    let ceiling = if error.is_bad_response() {
        BAD_RESPONSE_CEILING
    } else {
        TRANSPORT_CEILING
    };
    truncate_with_ellipsis(text, ceiling)
}

#[derive(Clone)]
pub struct SummarizationClient {
    backend: Arc<dyn SummaryBackend>,
}

impl SummarizationClient {
    #[must_use]
    pub fn new(backend: Arc<dyn SummaryBackend>) -> Self {
        Self { backend }
    }

    /// Raw backend outcome for already-trimmed, non-trivial text.
    async fn attempt(&self, text: &str, bounds: LengthBounds) -> Result<String, BackendError> {
        self.backend.summarize(text, bounds).await
    }

    /// Summarize `text` once. Never fails: empty or trivial input yields an empty
    /// string, and backend failures yield a truncated copy of the input.
    pub async fn summarize_once(&self, text: &str, max_len: u32, min_len: u32) -> String {
        let text = text.trim();
        if text.is_empty() || text.chars().count() < MIN_INPUT_CHARS {
            return String::new();
        }

        match self.attempt(text, LengthBounds { max_len, min_len }).await {
            Ok(summary) => summary.trim().to_string(),
            Err(e) => {
                warn!(
                    "Summarization backend failed ({}), using truncated input",
                    e
                );
                fallback_for(text, &e)
            }
        }
    }
}
