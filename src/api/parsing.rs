use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;

use crate::SlackError;
use crate::slack::command_parser::{SlackCommandEvent, parse_form_data};

pub fn parse_slack_event(payload: &str) -> Result<SlackCommandEvent, SlackError> {
    parse_form_data(payload)
        .map_err(|e| SlackError::ParseError(format!("Failed to parse form data: {}", e)))
}

/// Case-insensitive header lookup; API Gateway may lowercase header names.
pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Request body as text, decoding it when API Gateway marked it base64.
pub fn extract_body(payload: &Value) -> Result<String, SlackError> {
    let body = payload
        .get("body")
        .and_then(|b| b.as_str())
        .ok_or_else(|| SlackError::ParseError("Missing body".to_string()))?;

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !is_base64 {
        return Ok(body.to_string());
    }

    let bytes = general_purpose::STANDARD
        .decode(body)
        .map_err(|e| SlackError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| SlackError::ParseError(format!("Body is not UTF-8: {e}")))
}
