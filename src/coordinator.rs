//! Scroll coordinator
//!
//! Owns the native listeners, the handler registry and the frame loop. One
//! coordinator is constructed at the host's composition root and shared by
//! cloning the handle.

mod dispatcher;
mod disposer;
mod registry;

pub use dispatcher::{Coordinator, CoordinatorState, DispatchOptions, DispatchStats};
pub use disposer::Disposer;
