//! Hierarchical map-reduce summarization over chat messages.
//!
//! Small inputs are summarized in one call. Everything else is chunked on
//! message boundaries, each chunk is summarized (map), and the partial
//! summaries are combined into one final summary (reduce). Every path ends in
//! usable text; degenerate outcomes use the sentinel strings below.

use std::sync::Arc;
use tracing::info;

use super::chunker::{DEFAULT_CHUNK_CHARS, chunk_messages};
use super::client::{SummarizationClient, truncate_with_ellipsis};
use super::pacing::{NoDelay, Pacer};
use super::profile::LengthProfile;

pub const NO_MESSAGES: &str = "No messages to summarize.";
pub const NO_SUMMARY: &str = "Could not generate summary.";

/// Size thresholds for the pipeline, in characters.
#[derive(Debug, Clone, Copy)]
pub struct ReducerSettings {
    /// Inputs with fewer total characters skip chunking.
    pub short_input_chars: usize,
    /// Target size of each map chunk.
    pub chunk_chars: usize,
    /// Ceiling on the combined partials fed to the reduce call.
    pub combined_ceiling: usize,
}

impl Default for ReducerSettings {
    fn default() -> Self {
        Self {
            short_input_chars: 400,
            chunk_chars: DEFAULT_CHUNK_CHARS,
            combined_ceiling: 1000,
        }
    }
}

pub struct HierarchicalReducer {
    client: SummarizationClient,
    pacer: Arc<dyn Pacer>,
    settings: ReducerSettings,
}

impl HierarchicalReducer {
    #[must_use]
    pub fn new(client: SummarizationClient) -> Self {
        Self {
            client,
            pacer: Arc::new(NoDelay),
            settings: ReducerSettings::default(),
        }
    }

    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ReducerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Summarize `messages` (oldest first) at the given verbosity tier.
    pub async fn summarize<S: AsRef<str>>(&self, messages: &[S], tier: Option<&str>) -> String {
        if messages.is_empty() {
            return NO_MESSAGES.to_string();
        }

        let profile = LengthProfile::resolve(tier);

        let total_chars: usize = messages.iter().map(|m| m.as_ref().chars().count()).sum();
        if total_chars < self.settings.short_input_chars {
            info!(
                "Short input ({} chars across {} messages), summarizing directly",
                total_chars,
                messages.len()
            );
            let combined = messages
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join("\n");
            let summary = self
                .client
                .summarize_once(&combined, profile.reduce_max, profile.reduce_min)
                .await;
            return if summary.is_empty() {
                NO_SUMMARY.to_string()
            } else {
                summary
            };
        }

        let partials = self.map_chunks(messages, &profile).await;
        self.reduce(partials, &profile).await
    }

    async fn map_chunks<S: AsRef<str>>(
        &self,
        messages: &[S],
        profile: &LengthProfile,
    ) -> Vec<String> {
        let chunks = chunk_messages(messages, self.settings.chunk_chars);
        info!(
            "Split {} messages into {} chunk(s)",
            messages.len(),
            chunks.len()
        );

        let mut partials = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let summary = self
                .client
                .summarize_once(chunk, profile.map_max, profile.map_min)
                .await;
            if !summary.trim().is_empty() {
                partials.push(summary);
            }
            if i + 1 < chunks.len() {
                self.pacer.pause().await;
            }
        }

        info!(
            "Map phase produced {} partial summaries from {} chunk(s)",
            partials.len(),
            chunks.len()
        );
        partials
    }

    async fn reduce(&self, mut partials: Vec<String>, profile: &LengthProfile) -> String {
        match partials.len() {
            0 => return NO_SUMMARY.to_string(),
            1 => return partials.swap_remove(0),
            _ => {}
        }

        let combined = truncate_with_ellipsis(&partials.join(" "), self.settings.combined_ceiling);
        let summary = self
            .client
            .summarize_once(&combined, profile.reduce_max, profile.reduce_min)
            .await;

        if summary.is_empty() {
            partials[..2].join(" ")
        } else {
            summary
        }
    }
}
