use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Fixed frame interval used where there is no display refresh callback (~60Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Identifies one requested frame, like the id returned by `requestAnimationFrame`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Source of animation frames.
///
/// Each request yields exactly one future frame. The host calls
/// `Coordinator::on_frame` with the handle once that frame arrives.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug)]
struct IntervalState {
    interval: Duration,
    next_id: u64,
    requested: Option<FrameHandle>,
    last_fired: Option<Instant>,
}

/// Fixed-interval frame source for hosts without a refresh callback.
///
/// Cloning shares the underlying state: hand one clone to the coordinator and
/// keep one in the event loop to `poll_due`.
#[derive(Debug, Clone)]
pub struct IntervalFrames {
    state: Rc<RefCell<IntervalState>>,
}

impl Default for IntervalFrames {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl IntervalFrames {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: Rc::new(RefCell::new(IntervalState {
                interval,
                next_id: 0,
                requested: None,
                last_fired: None,
            })),
        }
    }

    pub fn interval(&self) -> Duration {
        self.state.borrow().interval
    }

    pub fn is_requested(&self) -> bool {
        self.state.borrow().requested.is_some()
    }

    /// Fire the requested frame if one interval has passed since the last one
    pub fn poll_due(&self, now: Instant) -> Option<FrameHandle> {
        let mut state = self.state.borrow_mut();
        let handle = state.requested?;
        let due = match state.last_fired {
            Some(last) => now.saturating_duration_since(last) >= state.interval,
            None => true,
        };
        if !due {
            return None;
        }
        state.requested = None;
        state.last_fired = Some(now);
        Some(handle)
    }

    /// How long the event loop may sleep before the next frame is due.
    /// `None` when no frame is requested.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        let state = self.state.borrow();
        state.requested?;
        let wait = match state.last_fired {
            Some(last) => (last + state.interval).saturating_duration_since(now),
            None => Duration::ZERO,
        };
        Some(wait)
    }
}

impl FrameScheduler for IntervalFrames {
    fn request_frame(&mut self) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let handle = FrameHandle(state.next_id);
        state.requested = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        if state.requested == Some(handle) {
            state.requested = None;
        }
    }
}

#[derive(Debug, Default)]
struct ManualState {
    next_id: u64,
    requested: Option<FrameHandle>,
    request_count: u64,
    cancel_count: u64,
}

/// Frame source driven entirely by the caller.
///
/// Useful for embedding in a loop that already has its own frame callback.
/// Shares state across clones like `IntervalFrames`.
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    state: Rc<RefCell<ManualState>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the requested frame, if any, clearing the request
    pub fn take_requested(&self) -> Option<FrameHandle> {
        self.state.borrow_mut().requested.take()
    }

    pub fn requested(&self) -> Option<FrameHandle> {
        self.state.borrow().requested
    }

    pub fn request_count(&self) -> u64 {
        self.state.borrow().request_count
    }

    pub fn cancel_count(&self) -> u64 {
        self.state.borrow().cancel_count
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.request_count += 1;
        let handle = FrameHandle(state.next_id);
        state.requested = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        if state.requested == Some(handle) {
            state.requested = None;
            state.cancel_count += 1;
        }
    }
}

#[cfg(test)]
#[path = "frame_scheduler_tests.rs"]
mod frame_scheduler_tests;
