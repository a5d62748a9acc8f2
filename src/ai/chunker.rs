//! Boundary-respecting chunking of labeled chat messages.

/// Default chunk budget, sized for the inference endpoint's input limit.
pub const DEFAULT_CHUNK_CHARS: usize = 800;

/// Group consecutive messages into newline-joined chunks of roughly `target_chars`.
///
/// Each message costs its character count plus one for the separator. A chunk is
/// flushed before a message that would push it past the budget, so boundaries
/// always fall between messages. A message longer than the budget is never split
/// and lands in a chunk of its own.
#[must_use]
pub fn chunk_messages<S: AsRef<str>>(messages: &[S], target_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for message in messages {
        let message = message.as_ref();
        let cost = message.chars().count() + 1;

        if current_len > 0 && current_len + cost > target_chars {
            chunks.push(current.join("\n"));
            current.clear();
            current_len = 0;
        }

        current.push(message);
        current_len += cost;
    }

    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }

    chunks
}
