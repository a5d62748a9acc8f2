use recap::slack::command_parser::{
    DEFAULT_HOURS, MAX_HOURS, decode_url_component, parse_form_data, parse_history_options,
    parse_pasted_text, sections_to_messages, split_sections,
};

#[test]
fn test_decode_url_component() {
    assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
    assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
    assert_eq!(
        decode_url_component("test%40example.com%26param%3Dvalue").unwrap(),
        "test@example.com&param=value"
    );
    // an encoded plus stays a plus
    assert_eq!(decode_url_component("1%2B1").unwrap(), "1+1");
}

#[test]
fn test_parse_form_data_success() {
    let form_data = "token=abc123&team_id=T123&team_domain=example&\
                    channel_id=C123&channel_name=general&user_id=U123&\
                    user_name=username&command=%2Fsummarize&text=hours%3D6+detail%3Dshort&\
                    response_url=https%3A%2F%2Fhooks.slack.com%2F&\
                    trigger_id=123.456&command_ts=1609753200";

    let event = parse_form_data(form_data).unwrap();

    assert_eq!(event.token, "abc123");
    assert_eq!(event.channel_id, "C123");
    assert_eq!(event.user_id, "U123");
    assert_eq!(event.command, "/summarize");
    assert_eq!(event.text, "hours=6 detail=short");
    assert_eq!(event.response_url, "https://hooks.slack.com/");
}

#[test]
fn test_parse_form_data_missing_fields_default_to_empty() {
    let event = parse_form_data("command=%2Fsummarize_text").unwrap();
    assert_eq!(event.command, "/summarize_text");
    assert!(event.text.is_empty());
    assert!(event.response_url.is_empty());
}

#[test]
fn test_parse_form_data_rejects_invalid_utf8() {
    assert!(parse_form_data("text=%FF%FE").is_err());
}

#[test]
fn test_history_options_defaults() {
    let options = parse_history_options("");
    assert_eq!(options.hours, DEFAULT_HOURS);
    assert_eq!(options.detail, None);
}

#[test]
fn test_history_options_parse_hours_and_detail() {
    let options = parse_history_options("hours=6 detail=Long");
    assert_eq!(options.hours, 6);
    assert_eq!(options.detail.as_deref(), Some("long"));
}

#[test]
fn test_history_hours_are_clamped() {
    assert_eq!(parse_history_options("hours=0").hours, 1);
    assert_eq!(parse_history_options("hours=9999").hours, MAX_HOURS);
    assert_eq!(parse_history_options("hours=soon").hours, DEFAULT_HOURS);
}

#[test]
fn test_split_sections_on_blank_lines() {
    let text = "First topic line one\nline two\r\n\r\n\n\nSecond topic\n\n   \n\nThird";
    assert_eq!(
        split_sections(text),
        vec![
            "First topic line one\nline two".to_string(),
            "Second topic".to_string(),
            "Third".to_string(),
        ]
    );
}

#[test]
fn test_pasted_text_with_leading_detail() {
    let options = parse_pasted_text("detail=short Release notes draft\n\nQA sign-off pending");
    assert_eq!(options.detail.as_deref(), Some("short"));
    assert_eq!(
        options.sections,
        vec![
            "Release notes draft".to_string(),
            "QA sign-off pending".to_string()
        ]
    );
}

#[test]
fn test_pasted_text_detail_must_lead() {
    let options = parse_pasted_text("We agreed detail=short is fine");
    assert_eq!(options.detail, None);
    assert_eq!(options.sections, vec!["We agreed detail=short is fine".to_string()]);
}

#[test]
fn test_blank_pasted_text_has_no_sections() {
    assert!(parse_pasted_text("detail=long   \n\n  ").sections.is_empty());
}

#[test]
fn test_sections_become_user_messages() {
    let sections = vec!["a plan".to_string(), "a risk".to_string()];
    assert_eq!(
        sections_to_messages(&sections),
        vec!["user: a plan".to_string(), "user: a risk".to_string()]
    );
}
