use std::time::{Duration, Instant};

/// Default delivery interval (~60Hz)
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
struct Pending<T> {
    args: T,
    /// When the trailing invocation becomes eligible. Acts as the single timer.
    due_at: Instant,
}

/// Trailing-edge throttle state.
///
/// Invokes at most once per `interval`. Calls arriving inside the interval are
/// coalesced into a single trailing invocation that carries the most recent
/// arguments. There is never more than one pending trailing invocation.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_invoked_at: Option<Instant>,
    pending: Option<Pending<T>>,
}

impl<T> Default for Throttle<T> {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE)
    }
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_invoked_at: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_invoked_at(&self) -> Option<Instant> {
        self.last_invoked_at
    }

    /// Offer a call at `now`.
    ///
    /// Returns `Some(args)` when the caller should invoke immediately (leading
    /// edge). Otherwise stores `args` as the trailing call and returns `None`.
    pub fn offer(&mut self, now: Instant, args: T) -> Option<T> {
        if self.is_eligible(now) {
            self.last_invoked_at = Some(now);
            self.pending = None;
            return Some(args);
        }

        match self.pending.as_mut() {
            // Keep the original due time, only the args move forward
            Some(pending) => pending.args = args,
            None => {
                let due_at = self
                    .last_invoked_at
                    .map_or(now, |last| last + self.interval);
                self.pending = Some(Pending { args, due_at });
            }
        }
        None
    }

    /// Release the trailing call once its due time has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.due_at);
        if !due {
            return None;
        }

        self.last_invoked_at = Some(now);
        self.pending.take().map(|p| p.args)
    }

    /// Drop any pending trailing call without invoking it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Due time of the pending trailing call, if any
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    fn is_eligible(&self, now: Instant) -> bool {
        match self.last_invoked_at {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "throttle_state_tests.rs"]
mod throttle_state_tests;
