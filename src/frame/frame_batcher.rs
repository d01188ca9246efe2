use super::frame_scheduler::{FrameHandle, FrameScheduler};
use crate::event::ScrollEvent;

/// Conditionally-running frame loop holding at most one pending event.
///
/// While running there is always exactly one requested frame. Each accepted
/// frame drains the pending slot; the next frame is requested at the end of the
/// tick unless the loop was stopped in the meantime.
pub struct FrameBatcher {
    frames: Box<dyn FrameScheduler>,
    running: bool,
    scheduled: Option<FrameHandle>,
    pending: Option<ScrollEvent>,
    frames_run: u64,
}

impl FrameBatcher {
    pub fn new(frames: Box<dyn FrameScheduler>) -> Self {
        Self {
            frames,
            running: false,
            scheduled: None,
            pending: None,
            frames_run: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle of the frame currently awaited, if any
    pub fn scheduled(&self) -> Option<FrameHandle> {
        self.scheduled
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.request_next();
    }

    /// Stop requesting frames and drop any undelivered event
    pub fn stop(&mut self) {
        self.running = false;
        self.pending = None;
        if let Some(handle) = self.scheduled.take() {
            self.frames.cancel_frame(handle);
        }
    }

    /// Overwrite the pending slot. Ignored while stopped.
    pub fn stash(&mut self, event: ScrollEvent) {
        if self.running {
            self.pending = Some(event);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Accept a frame callback. Stale or unexpected handles are rejected.
    pub fn begin_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.running || self.scheduled != Some(handle) {
            return false;
        }
        self.scheduled = None;
        self.frames_run += 1;
        true
    }

    pub fn take_pending(&mut self) -> Option<ScrollEvent> {
        self.pending.take()
    }

    /// Keep the loop alive: request the next frame if still running
    pub fn end_frame(&mut self) {
        if self.running && self.scheduled.is_none() {
            self.request_next();
        }
    }

    fn request_next(&mut self) {
        self.scheduled = Some(self.frames.request_frame());
    }
}

impl std::fmt::Debug for FrameBatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBatcher")
            .field("running", &self.running)
            .field("scheduled", &self.scheduled)
            .field("pending", &self.pending)
            .field("frames_run", &self.frames_run)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "frame_batcher_tests.rs"]
mod frame_batcher_tests;
