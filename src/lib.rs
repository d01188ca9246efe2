//! scrollcast - unified scroll/viewport event coordinator
//!
//! One native listener per event kind, frame-synchronized delivery and
//! per-consumer throttling for any number of scroll-driven effects.

pub mod config;
pub mod consumers;
pub mod coordinator;
pub mod demo;
pub mod error;
pub mod event;
pub mod frame;
pub mod host;

#[cfg(test)]
pub mod test_utils;
pub mod throttle;

// Re-export commonly used types for convenience
pub use config::Config;
pub use coordinator::{Coordinator, Disposer};
pub use error::{HandlerError, HandlerResult, RegisterError};
pub use event::{Direction, ScrollEvent};
pub use host::{ListenerKind, Window};
