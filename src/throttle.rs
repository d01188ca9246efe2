//! Trailing-edge throttling
//!
//! `Throttle` is the plain state record (last invocation, pending args, due time)
//! that the coordinator keeps per handler. `Throttled` wraps a callback with that
//! state for standalone use.

mod throttle_state;
mod throttled;

pub use throttle_state::{DEFAULT_THROTTLE, Throttle};
pub use throttled::Throttled;
