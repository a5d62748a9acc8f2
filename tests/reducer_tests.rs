mod common;

use common::{CountingPacer, ScriptedBackend, messages};
use recap::ai::{
    HierarchicalReducer, LengthBounds, LengthProfile, LengthTier, NO_MESSAGES, NO_SUMMARY,
    ReducerSettings, SummarizationClient,
};
use std::sync::Arc;

fn reducer_with(backend: &Arc<ScriptedBackend>) -> HierarchicalReducer {
    HierarchicalReducer::new(SummarizationClient::new(backend.clone()))
}

fn partial(i: usize) -> String {
    format!("summary of chunk {i} with details")
}

#[tokio::test]
async fn test_empty_input_returns_sentinel_without_backend_calls() {
    let backend = Arc::new(ScriptedBackend::constant("unused"));
    let result = reducer_with(&backend).summarize::<String>(&[], None).await;

    assert_eq!(result, NO_MESSAGES);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_short_input_makes_exactly_one_reduce_call() {
    let backend = Arc::new(ScriptedBackend::constant("Alice will write tests tonight, then v2 ships."));
    let msgs = vec![
        "alice: let's ship v2 tomorrow".to_string(),
        "bob: need tests first".to_string(),
        "alice: ok I'll write them tonight".to_string(),
    ];

    let result = reducer_with(&backend).summarize(&msgs, Some("short")).await;

    assert_eq!(result, "Alice will write tests tonight, then v2 ships.");
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, msgs.join("\n"));
    let short = LengthProfile::for_tier(LengthTier::Short);
    assert_eq!(
        calls[0].1,
        LengthBounds {
            max_len: short.reduce_max,
            min_len: short.reduce_min
        }
    );
}

#[tokio::test]
async fn test_short_input_with_blank_summary_returns_sentinel() {
    let backend = Arc::new(ScriptedBackend::constant(""));
    let msgs = vec!["carol: standup moved to 10am tomorrow, same room".to_string()];

    let result = reducer_with(&backend).summarize(&msgs, None).await;

    assert_eq!(result, NO_SUMMARY);
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_single_chunk_partial_is_returned_unchanged() {
    let backend = Arc::new(ScriptedBackend::constant("the only partial summary"));
    // 5 x 99 chars: above the short-input threshold, inside one 800-char chunk
    let msgs = messages(5);

    let result = reducer_with(&backend).summarize(&msgs, Some("medium")).await;

    assert_eq!(result, "the only partial summary");
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    let medium = LengthProfile::for_tier(LengthTier::Medium);
    assert_eq!(calls[0].1.max_len, medium.map_max);
    assert_eq!(calls[0].1.min_len, medium.map_min);
}

#[tokio::test]
async fn test_all_blank_partials_return_sentinel() {
    let backend = Arc::new(ScriptedBackend::constant("   "));
    // 20 x 100 chars of budget => chunks of 8, 8, 4 messages
    let msgs = messages(20);

    let result = reducer_with(&backend).summarize(&msgs, None).await;

    assert_eq!(result, NO_SUMMARY);
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn test_partials_are_combined_in_one_reduce_call() {
    let backend = Arc::new(ScriptedBackend::new(|i, _| {
        if i < 3 {
            Ok(partial(i))
        } else {
            Ok("final combined summary".to_string())
        }
    }));
    let msgs = messages(20);

    let result = reducer_with(&backend).summarize(&msgs, Some("long")).await;

    assert_eq!(result, "final combined summary");
    let calls = backend.calls();
    assert_eq!(calls.len(), 4);

    let (reduce_input, reduce_bounds) = &calls[3];
    assert_eq!(
        reduce_input,
        &format!("{} {} {}", partial(0), partial(1), partial(2))
    );
    let long = LengthProfile::for_tier(LengthTier::Long);
    assert_eq!(reduce_bounds.max_len, long.reduce_max);
    assert_eq!(reduce_bounds.min_len, long.reduce_min);
}

#[tokio::test]
async fn test_map_chunks_keep_message_order() {
    let backend = Arc::new(ScriptedBackend::new(|i, _| Ok(partial(i))));
    let msgs = messages(20);

    reducer_with(&backend).summarize(&msgs, None).await;

    let calls = backend.calls();
    assert_eq!(calls[0].0, msgs[..8].join("\n"));
    assert_eq!(calls[1].0, msgs[8..16].join("\n"));
    assert_eq!(calls[2].0, msgs[16..].join("\n"));
}

#[tokio::test]
async fn test_blank_reduce_falls_back_to_first_two_partials() {
    let backend = Arc::new(ScriptedBackend::new(|i, _| {
        if i < 3 { Ok(partial(i)) } else { Ok(String::new()) }
    }));
    let msgs = messages(20);

    let result = reducer_with(&backend).summarize(&msgs, None).await;

    assert_eq!(result, format!("{} {}", partial(0), partial(1)));
}

#[tokio::test]
async fn test_blank_chunk_is_skipped_before_reduce() {
    let backend = Arc::new(ScriptedBackend::new(|i, _| match i {
        1 => Ok(String::new()),
        3 => Ok("reduced".to_string()),
        _ => Ok(partial(i)),
    }));
    let msgs = messages(20);

    let result = reducer_with(&backend).summarize(&msgs, None).await;

    assert_eq!(result, "reduced");
    let calls = backend.calls();
    assert_eq!(calls[3].0, format!("{} {}", partial(0), partial(2)));
}

#[tokio::test]
async fn test_combined_partials_are_capped_before_reduce() {
    let backend = Arc::new(ScriptedBackend::new(|i, _| {
        if i < 3 {
            Ok(format!("{i}{}", "p".repeat(599)))
        } else {
            Ok("reduced".to_string())
        }
    }));
    let msgs = messages(20);

    reducer_with(&backend).summarize(&msgs, None).await;

    let calls = backend.calls();
    let reduce_input = &calls[3].0;
    assert_eq!(reduce_input.chars().count(), 1000);
    assert!(reduce_input.starts_with('0'));
    assert!(reduce_input.ends_with("..."));
}

#[tokio::test]
async fn test_pacing_happens_between_map_calls_only() {
    let backend = Arc::new(ScriptedBackend::new(|i, _| Ok(partial(i))));
    let pacer = Arc::new(CountingPacer::default());
    let reducer = reducer_with(&backend).with_pacer(pacer.clone());

    reducer.summarize(&messages(20), None).await;

    // three map calls => two pauses, none after the last chunk or around reduce
    assert_eq!(pacer.pauses(), 2);
}

#[tokio::test]
async fn test_backend_failures_still_produce_text() {
    let backend = Arc::new(ScriptedBackend::new(|_, _| {
        Err(recap::ai::BackendError::Transport(
            "connection refused".to_string(),
        ))
    }));
    let msgs = messages(20);

    let result = reducer_with(&backend).summarize(&msgs, None).await;

    assert!(!result.is_empty());
    assert!(result.ends_with("..."));
}

#[tokio::test]
async fn test_custom_settings_drive_thresholds() {
    let backend = Arc::new(ScriptedBackend::new(|i, _| {
        if i < 2 {
            Ok(format!("{i}{}", "q".repeat(79)))
        } else {
            Ok("reduced".to_string())
        }
    }));
    let reducer = reducer_with(&backend).with_settings(ReducerSettings {
        short_input_chars: 50,
        chunk_chars: 200,
        combined_ceiling: 100,
    });

    // 4 x 99 chars: under the default short-input threshold, over this one
    let result = reducer.summarize(&messages(4), None).await;

    assert_eq!(result, "reduced");
    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].0, messages(4)[..2].join("\n"));
    assert_eq!(calls[2].0.chars().count(), 100);
    assert!(calls[2].0.ends_with("..."));
}
