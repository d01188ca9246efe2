//! Normalized scroll events
//!
//! Raw host readings go through the `Normalizer`, which filters sub-pixel noise
//! and derives delta, direction and velocity relative to the last delivered frame.

mod normalizer;
mod scroll_event;

pub use normalizer::{DEFAULT_NOISE_THRESHOLD, Normalizer, RawReading};
pub use scroll_event::{Direction, ScrollEvent, ScrollOffset, ViewportSize};
