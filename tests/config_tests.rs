use recap::core::config::{AppConfig, DEFAULT_HF_API_URL};
use std::collections::HashMap;
use std::time::Duration;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 3] = [
    ("PROCESSING_QUEUE_URL", "https://sqs.example/queue"),
    ("SLACK_SIGNING_SECRET", "secret"),
    ("SLACK_BOT_TOKEN", "xoxb-test"),
];

#[test]
fn test_defaults_apply() {
    let config = AppConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

    assert_eq!(config.hf_api_url, DEFAULT_HF_API_URL);
    assert_eq!(config.hf_api_token, None);
    assert_eq!(config.summary_timeout, Duration::from_secs(45));
    assert_eq!(config.summarizer_timeout, Duration::from_secs(30));
    assert_eq!(config.map_delay, Duration::from_millis(500));
    assert_eq!(config.command_cooldown, Duration::from_secs(60));
    assert_eq!(config.max_messages, 1500);
}

#[test]
fn test_overrides_and_summarizer_config() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("HF_TOKEN", "hf_abc"),
        ("HF_API_URL", "http://localhost:8080/summarize"),
        ("SUMMARIZER_TIMEOUT_SECS", "5"),
        ("MAP_DELAY_MS", "0"),
    ]);
    let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();

    let summarizer = config.summarizer_config();
    assert_eq!(summarizer.endpoint, "http://localhost:8080/summarize");
    assert_eq!(summarizer.api_token.as_deref(), Some("hf_abc"));
    assert_eq!(summarizer.request_timeout, Duration::from_secs(5));
    assert!(config.map_delay.is_zero());
}

#[test]
fn test_missing_required_variable_is_named() {
    let err = AppConfig::from_lookup(lookup_from(&REQUIRED[..2])).unwrap_err();
    assert!(err.contains("SLACK_BOT_TOKEN"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("SUMMARY_TIMEOUT_SECS", "soon"));
    let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert!(err.contains("SUMMARY_TIMEOUT_SECS"));

    let mut pairs = REQUIRED.to_vec();
    pairs.push(("HF_API_URL", "not a url"));
    let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert!(err.contains("HF_API_URL"));
}
