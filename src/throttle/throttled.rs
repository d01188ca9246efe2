use std::time::{Duration, Instant};

use super::throttle_state::Throttle;
use crate::error::catch_handler_panic;

/// A callback wrapped in a trailing-edge throttle.
///
/// The host drives time: `call` on every trigger, `flush` whenever it gets a
/// chance to run timers. A panicking callback is logged and swallowed so one
/// failing consumer cannot break the loop that drives it.
pub struct Throttled<T, F>
where
    F: FnMut(T),
{
    name: String,
    state: Throttle<T>,
    callback: F,
}

impl<T, F> Throttled<T, F>
where
    F: FnMut(T),
{
    pub fn new(name: impl Into<String>, interval: Duration, callback: F) -> Self {
        Self {
            name: name.into(),
            state: Throttle::new(interval),
            callback,
        }
    }

    /// Returns true if the callback ran on this call
    pub fn call(&mut self, now: Instant, args: T) -> bool {
        match self.state.offer(now, args) {
            Some(args) => {
                self.invoke(args);
                true
            }
            None => false,
        }
    }

    /// Run the trailing call if it is due. Returns true if the callback ran.
    pub fn flush(&mut self, now: Instant) -> bool {
        match self.state.poll(now) {
            Some(args) => {
                self.invoke(args);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    pub fn has_pending(&self) -> bool {
        self.state.has_pending()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.state.next_due()
    }

    fn invoke(&mut self, args: T) {
        let callback = &mut self.callback;
        if let Err(err) = catch_handler_panic(|| callback(args)) {
            log::error!("Throttled callback '{}' failed: {}", self.name, err);
        }
    }
}

impl<T, F> std::fmt::Debug for Throttled<T, F>
where
    T: std::fmt::Debug,
    F: FnMut(T),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttled")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "throttled_tests.rs"]
mod throttled_tests;
