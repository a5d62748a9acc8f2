#![allow(dead_code)]

use async_trait::async_trait;
use recap::ai::{BackendError, LengthBounds, Pacer, SummaryBackend};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Script = Box<dyn Fn(usize, &str) -> Result<String, BackendError> + Send + Sync>;

/// Backend that answers from a script and records every call.
pub struct ScriptedBackend {
    script: Script,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, LengthBounds)>>,
}

impl ScriptedBackend {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(usize, &str) -> Result<String, BackendError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn constant(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, LengthBounds)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SummaryBackend for ScriptedBackend {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, BackendError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((text.to_string(), bounds));
            calls.len() - 1
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.script)(index, text)
    }
}

/// Pacer that only counts how often it was asked to pause.
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// A labeled message of exactly 99 characters.
pub fn message(i: usize) -> String {
    format!("u{:02}: {}", i % 100, "a".repeat(94))
}

pub fn messages(n: usize) -> Vec<String> {
    (0..n).map(message).collect()
}
