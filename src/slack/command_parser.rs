use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hours of history summarized when the command does not say otherwise.
pub const DEFAULT_HOURS: u32 = 24;

/// Largest history window a command may request.
pub const MAX_HOURS: u32 = 168;

/// Structure representing a Slack slash command event.
/// This contains all the fields that Slack sends when a user invokes a slash command.
#[derive(Debug, Deserialize, Serialize)]
pub struct SlackCommandEvent {
    pub token: String,
    pub team_id: String,
    pub team_domain: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
    pub command_ts: String,
}

/// Options of `/summarize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOptions {
    pub hours: u32,
    pub detail: Option<String>,
}

/// Options and body of `/summarize_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastedTextOptions {
    pub detail: Option<String>,
    pub sections: Vec<String>,
}

/// Decodes URL encoded string using percent_encoding crate
///
/// # Examples
///
/// ```
/// use recap::slack::command_parser::decode_url_component;
///
/// assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    // Form encoding uses '+' for spaces; swap before decoding so an encoded "%2B" survives.
    percent_decode_str(&input.replace('+', " "))
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {}", e))
}

/// Parses URL-encoded form data into a SlackCommandEvent structure.
///
/// Missing fields default to empty strings.
///
/// # Examples
///
/// ```
/// use recap::slack::command_parser::parse_form_data;
///
/// let form_data = "token=abc123&team_id=T123&team_domain=example&\
///                  channel_id=C123&channel_name=general&user_id=U123&\
///                  user_name=username&command=%2Fsummarize&text=hours%3D6&\
///                  response_url=https%3A%2F%2Fhooks.slack.com%2F&\
///                  trigger_id=123.456&command_ts=1609753200";
///
/// let event = parse_form_data(form_data).unwrap();
/// assert_eq!(event.command, "/summarize");
/// assert_eq!(event.text, "hours=6");
/// ```
pub fn parse_form_data(form_data: &str) -> Result<SlackCommandEvent, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| format!("Failed to decode key: {}", e))?;

            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| format!("Failed to decode value: {}", e))?;

            map.insert(key, value);
        }
    }

    let field = |name: &str| map.get(name).cloned().unwrap_or_default();

    Ok(SlackCommandEvent {
        token: field("token"),
        team_id: field("team_id"),
        team_domain: field("team_domain"),
        channel_id: field("channel_id"),
        channel_name: field("channel_name"),
        user_id: field("user_id"),
        user_name: field("user_name"),
        command: field("command"),
        text: field("text"),
        response_url: field("response_url"),
        trigger_id: field("trigger_id"),
        command_ts: field("command_ts"),
    })
}

static KV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)\s*=\s*("[^"]*"|\S+)"#).expect("static regex compile"));

static LEADING_DETAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?i:detail)\s*=\s*(\S+)").expect("static regex compile")
});

/// Parse `/summarize` text such as `hours=6 detail=short`.
///
/// Hours default to [`DEFAULT_HOURS`] when absent or unparsable and are
/// clamped to `1..=MAX_HOURS`.
#[must_use]
pub fn parse_history_options(text: &str) -> HistoryOptions {
    let mut hours = DEFAULT_HOURS;
    let mut detail = None;

    for cap in KV_RE.captures_iter(text) {
        let key = cap[1].to_lowercase();
        let raw = cap[2].trim_matches('"');
        match key.as_str() {
            "hours" => {
                if let Ok(h) = raw.parse::<u32>() {
                    hours = h.clamp(1, MAX_HOURS);
                }
            }
            "detail" => detail = Some(raw.to_lowercase()),
            _ => {}
        }
    }

    HistoryOptions { hours, detail }
}

/// Split pasted text on blank lines, one trimmed section per paragraph.
#[must_use]
pub fn split_sections(text: &str) -> Vec<String> {
    text.replace('\r', "")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `/summarize_text` text: an optional leading `detail=...` then the body.
#[must_use]
pub fn parse_pasted_text(text: &str) -> PastedTextOptions {
    let (detail, body) = match LEADING_DETAIL_RE.captures(text) {
        Some(cap) => {
            let end = cap.get(0).map_or(0, |m| m.end());
            (Some(cap[1].to_lowercase()), &text[end..])
        }
        None => (None, text),
    };

    PastedTextOptions {
        detail,
        sections: split_sections(body),
    }
}

/// Turn sections into labeled synthetic messages for the summarizer.
#[must_use]
pub fn sections_to_messages(sections: &[String]) -> Vec<String> {
    sections.iter().map(|p| format!("user: {p}")).collect()
}
