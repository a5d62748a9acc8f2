//! User-facing reply texts.

pub const NO_MESSAGES_IN_WINDOW: &str = "No messages found in that window.";
pub const NOTHING_TO_SUMMARIZE: &str = "Nothing to summarize.";
pub const ACCESS_DENIED: &str = "I don't have permission to read this channel.";
pub const HISTORY_TIMEOUT: &str =
    "❌ Summary took too long. Try fewer hours or a less busy channel.";
pub const TEXT_TIMEOUT: &str = "❌ Summary took too long. Try shorter text.";

/// Render a finished summary with the processed-input footer.
#[must_use]
pub fn format_summary_message(summary: &str, processed: usize, unit: &str) -> String {
    format!("*Summary*\n{}\n\n_(processed {processed} {unit})_", summary.trim())
}

#[must_use]
pub fn cooldown_message(seconds: u64) -> String {
    format!("Please wait {seconds} seconds before using this command again.")
}

#[must_use]
pub fn usage_message(command: &str) -> String {
    format!(
        "Unknown command `{command}`. Use `/summarize [hours=N] [detail=short|medium|long]` \
         or `/summarize_text [detail=short|medium|long] <text>`."
    )
}
