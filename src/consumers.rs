//! Consumer adapters built on the public coordinator API
//!
//! Each adapter owns its state behind a shared handle and registers one named
//! handler. Clones observe the same state, so the host can keep one for
//! rendering while the coordinator drives the other.

mod delivery_monitor;
mod fade;
mod parallax;
mod viewport;

pub use delivery_monitor::{DeliveryMonitor, MonitorReport};
pub use fade::{DEFAULT_FADE_START_RATIO, Fade, fade_opacity};
pub use parallax::{DEFAULT_PARALLAX_MULTIPLIER, Parallax, parallax_offset};
pub use viewport::ViewportTracker;
