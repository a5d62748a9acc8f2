//! Per-user command cooldown.
//!
//! Lives in the API Lambda's memory, so it only spans requests served by the
//! same warm instance.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct Cooldown {
    window: Duration,
    last_accepted: Mutex<HashMap<String, Instant>>,
}

impl Cooldown {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a command from `user_id`; false while the user is still cooling down.
    pub fn try_acquire(&self, user_id: &str) -> bool {
        self.try_acquire_at(user_id, Instant::now())
    }

    pub fn try_acquire_at(&self, user_id: &str, now: Instant) -> bool {
        let mut last = self
            .last_accepted
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(prev) = last.get(user_id)
            && now.saturating_duration_since(*prev) < self.window
        {
            return false;
        }

        last.retain(|_, prev| now.saturating_duration_since(*prev) < self.window);
        last.insert(user_id.to_string(), now);
        true
    }
}
