//! Fetch rate limiting
//!
//! A `FetchGate` decides when a data fetch triggered by view changes may run.
//! The caller passes the current `Instant` in, so the gate has no clock of
//! its own and is deterministic under test.

use std::time::{Duration, Instant};

/// How view changes are turned into fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Fetch on every request
    Immediate,
    /// At most one fetch per interval; the last suppressed request fires
    /// once the interval has passed
    Throttle(Duration),
    /// Fetch only after no request arrived for the given quiet period
    Debounce(Duration),
}

impl Default for FetchPolicy {
    fn default() -> Self {
        FetchPolicy::Throttle(Duration::from_millis(500))
    }
}

/// Per-view state for a `FetchPolicy`
#[derive(Debug, Clone)]
pub struct FetchGate {
    policy: FetchPolicy,
    last_fired: Option<Instant>,
    pending_since: Option<Instant>,
}

impl FetchGate {
    pub fn new(policy: FetchPolicy) -> Self {
        Self { policy, last_fired: None, pending_since: None }
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    /// Whether a deferred request is waiting for `poll`
    pub fn has_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Register a request; true if the fetch should run now
    ///
    /// A false return leaves the request pending for `poll`.
    pub fn request(&mut self, now: Instant) -> bool {
        match self.policy {
            FetchPolicy::Immediate => self.fire(now),
            FetchPolicy::Throttle(interval) => {
                if self.interval_elapsed(now, interval) {
                    self.fire(now)
                } else {
                    self.pending_since = Some(now);
                    false
                }
            }
            FetchPolicy::Debounce(_) => {
                self.pending_since = Some(now);
                false
            }
        }
    }

    /// True once a pending request is due; clears it
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(since) = self.pending_since else {
            return false;
        };
        let due = match self.policy {
            FetchPolicy::Immediate => true,
            FetchPolicy::Throttle(interval) => self.interval_elapsed(now, interval),
            FetchPolicy::Debounce(quiet) => now.saturating_duration_since(since) >= quiet,
        };
        if due {
            self.fire(now)
        } else {
            false
        }
    }

    /// Drop any pending request
    pub fn cancel(&mut self) {
        self.pending_since = None;
    }

    fn interval_elapsed(&self, now: Instant, interval: Duration) -> bool {
        self.last_fired
            .map_or(true, |last| now.saturating_duration_since(last) >= interval)
    }

    fn fire(&mut self, now: Instant) -> bool {
        self.last_fired = Some(now);
        self.pending_since = None;
        true
    }
}
