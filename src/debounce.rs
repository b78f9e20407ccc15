// ⏱️ Search Debouncer - at most one pending recomputation
// Each keystroke replaces the pending query and restarts the delay; nothing
// queues. Callers pass `now` in, so the type holds no clock of its own.

use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    due: Instant,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        SearchDebouncer {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke; supersedes any query still pending
    pub fn push(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            due: now + self.delay,
        });
    }

    /// Take the pending query once its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self.pending.as_ref()?.due;
        if now >= due {
            self.pending.take().map(|p| p.query)
        } else {
            None
        }
    }

    /// Take the pending query immediately (e.g., on Enter)
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.query)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending query fires, if any
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}
