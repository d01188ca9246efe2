//! Frame scheduling
//!
//! `FrameScheduler` is the `requestAnimationFrame` seam. `FrameBatcher` runs the
//! conditionally-running frame loop on top of it and holds the pending event.

mod frame_batcher;
mod frame_scheduler;

pub use frame_batcher::FrameBatcher;
pub use frame_scheduler::{
    DEFAULT_FRAME_INTERVAL, FrameHandle, FrameScheduler, IntervalFrames, ManualFrames,
};
