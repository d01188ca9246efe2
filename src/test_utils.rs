//! Shared test utilities for scrollcast
//!
//! A scriptable window and a harness that drives the coordinator frame by frame
//! on a fake clock, so timing tests never sleep.

#[cfg(test)]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use crate::coordinator::Coordinator;
    use crate::error::HandlerResult;
    use crate::event::{ScrollEvent, ScrollOffset, ViewportSize};
    use crate::frame::ManualFrames;
    use crate::host::{ListenerKind, Window};

    #[derive(Debug)]
    struct WindowState {
        now: Instant,
        offset: ScrollOffset,
        size: ViewportSize,
        listeners: HashMap<ListenerKind, usize>,
        add_calls: usize,
        remove_calls: usize,
    }

    /// Window whose clock, offset and size are set by the test.
    /// Clones share state.
    #[derive(Debug, Clone)]
    pub struct MockWindow {
        state: Rc<RefCell<WindowState>>,
    }

    impl MockWindow {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                state: Rc::new(RefCell::new(WindowState {
                    now: Instant::now(),
                    offset: ScrollOffset::default(),
                    size: ViewportSize::new(width, height),
                    listeners: HashMap::new(),
                    add_calls: 0,
                    remove_calls: 0,
                })),
            }
        }

        pub fn advance(&self, ms: u64) {
            self.state.borrow_mut().now += Duration::from_millis(ms);
        }

        pub fn set_offset(&self, x: f64, y: f64) {
            self.state.borrow_mut().offset = ScrollOffset::new(x, y);
        }

        pub fn set_size(&self, width: u32, height: u32) {
            self.state.borrow_mut().size = ViewportSize::new(width, height);
        }

        pub fn listener_count(&self, kind: ListenerKind) -> usize {
            self.state.borrow().listeners.get(&kind).copied().unwrap_or(0)
        }

        pub fn total_listeners(&self) -> usize {
            self.state.borrow().listeners.values().sum()
        }

        pub fn add_calls(&self) -> usize {
            self.state.borrow().add_calls
        }

        pub fn remove_calls(&self) -> usize {
            self.state.borrow().remove_calls
        }
    }

    impl Window for MockWindow {
        fn now(&self) -> Instant {
            self.state.borrow().now
        }

        fn scroll_offset(&self) -> ScrollOffset {
            self.state.borrow().offset
        }

        fn inner_size(&self) -> ViewportSize {
            self.state.borrow().size
        }

        fn add_event_listener(&mut self, kind: ListenerKind) {
            let mut state = self.state.borrow_mut();
            state.add_calls += 1;
            *state.listeners.entry(kind).or_insert(0) += 1;
        }

        fn remove_event_listener(&mut self, kind: ListenerKind) {
            let mut state = self.state.borrow_mut();
            state.remove_calls += 1;
            if let Some(count) = state.listeners.get_mut(&kind) {
                *count = count.saturating_sub(1);
            }
        }
    }

    /// Coordinator wired to a mock window and manual frames
    pub struct Harness {
        pub coordinator: Coordinator,
        pub window: MockWindow,
        pub frames: ManualFrames,
    }

    impl Harness {
        pub fn new() -> Self {
            let window = MockWindow::new(1280, 720);
            let frames = ManualFrames::new();
            let coordinator = Coordinator::new(window.clone(), frames.clone());
            Self {
                coordinator,
                window,
                frames,
            }
        }

        /// Move the window and fire a native scroll event
        pub fn scroll_to(&self, y: f64) {
            self.window.set_offset(0.0, y);
            self.coordinator.handle_native_event(ListenerKind::Scroll);
        }

        pub fn scroll_to_xy(&self, x: f64, y: f64) {
            self.window.set_offset(x, y);
            self.coordinator.handle_native_event(ListenerKind::Scroll);
        }

        pub fn resize(&self, width: u32, height: u32) {
            self.window.set_size(width, height);
            self.coordinator.handle_native_event(ListenerKind::Resize);
        }

        /// Fire the requested frame, if any. Returns false when the loop is stopped.
        pub fn run_frame(&self) -> bool {
            match self.frames.take_requested() {
                Some(handle) => {
                    self.coordinator.on_frame(handle);
                    true
                }
                None => false,
            }
        }

        /// Advance the clock by `ms` then run a frame
        pub fn frame_after(&self, ms: u64) -> bool {
            self.window.advance(ms);
            self.run_frame()
        }
    }

    /// Shared log of events a handler received
    pub type Received = Rc<RefCell<Vec<ScrollEvent>>>;

    /// Handler that records every event into the returned log
    pub fn recording_handler() -> (Received, impl FnMut(&ScrollEvent) -> HandlerResult + 'static) {
        let received: Received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        let handler = move |event: &ScrollEvent| -> HandlerResult {
            sink.borrow_mut().push(*event);
            Ok(())
        };
        (received, handler)
    }
}
