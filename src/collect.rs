//! Turning channel history into labeled messages for the summarizer.

use std::collections::HashMap;
use std::future::Future;

/// A history entry reduced to what the summarizer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    pub user_id: Option<String>,
    pub is_bot: bool,
    pub is_system: bool,
    /// Slack timestamp, seconds since the epoch.
    pub ts: f64,
    pub text: String,
}

/// Remove carriage returns and surrounding whitespace.
#[must_use]
pub fn clean_content(text: &str) -> String {
    text.replace('\r', "").trim().to_string()
}

/// Whether a history entry was written by a person and has content.
#[must_use]
pub fn is_user_message(msg: &RawMessage, bot_user_id: Option<&str>) -> bool {
    let is_from_this_bot = bot_user_id
        .zip(msg.user_id.as_deref())
        .is_some_and(|(bot, user)| bot == user);
    msg.user_id.is_some()
        && !msg.is_bot
        && !msg.is_system
        && !is_from_this_bot
        && !clean_content(&msg.text).is_empty()
}

/// Keep messages written by people, oldest first. When more than
/// `max_messages` remain, only the most recent ones are kept.
///
/// Drops bot and system messages, messages by `bot_user_id`, and messages
/// whose content is empty after cleaning.
#[must_use]
pub fn filter_user_messages(
    mut messages: Vec<RawMessage>,
    bot_user_id: Option<&str>,
    max_messages: usize,
) -> Vec<RawMessage> {
    messages.sort_by(|a, b| a.ts.total_cmp(&b.ts));
    let mut kept: Vec<RawMessage> = messages
        .into_iter()
        .filter(|msg| is_user_message(msg, bot_user_id))
        .collect();

    let excess = kept.len().saturating_sub(max_messages);
    kept.drain(..excess);
    kept
}

/// Render messages as `"<name>: <content>"`, resolving names through `names`.
/// Unknown users keep their raw id.
#[must_use]
pub fn label_messages(messages: &[RawMessage], names: &HashMap<String, String>) -> Vec<String> {
    messages
        .iter()
        .map(|msg| {
            let user_id = msg.user_id.as_deref().unwrap_or("unknown");
            let name = names.get(user_id).map_or(user_id, String::as_str);
            format!("{}: {}", name, clean_content(&msg.text))
        })
        .collect()
}

/// One page of history and the cursor of the page after it.
#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub messages: Vec<RawMessage>,
    pub next_cursor: Option<String>,
}

/// Walk history pages until `max_messages` user messages were seen or the
/// history ends, then filter and cap them with [`filter_user_messages`].
///
/// Only entries that survive the filter count toward the cap, so bot-heavy
/// pages do not end pagination early.
///
/// # Errors
///
/// Returns the first error `fetch_page` reports.
pub async fn collect_user_messages<F, Fut, E>(
    bot_user_id: Option<&str>,
    max_messages: usize,
    mut fetch_page: F,
) -> Result<Vec<RawMessage>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<HistoryPage, E>>,
{
    let mut collected: Vec<RawMessage> = Vec::new();
    let mut user_messages = 0usize;
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch_page(cursor.take()).await?;
        user_messages += page
            .messages
            .iter()
            .filter(|msg| is_user_message(msg, bot_user_id))
            .count();
        collected.extend(page.messages);

        match page.next_cursor {
            Some(next) if user_messages < max_messages => cursor = Some(next),
            _ => break,
        }
    }

    Ok(filter_user_messages(collected, bot_user_id, max_messages))
}
