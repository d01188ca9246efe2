//! Host window seam
//!
//! The coordinator never touches a concrete UI toolkit. Whatever owns the real
//! window implements `Window` and forwards native events to
//! `Coordinator::handle_native_event`.

use std::time::Instant;

use crate::event::{RawReading, ScrollOffset, ViewportSize};

/// Native event kinds the coordinator listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Scroll,
    Wheel,
    Resize,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 3] = [
        ListenerKind::Scroll,
        ListenerKind::Wheel,
        ListenerKind::Resize,
    ];
}

/// The window the coordinator observes
pub trait Window {
    /// Monotonic clock used for timestamps, throttling and velocity
    fn now(&self) -> Instant;

    fn scroll_offset(&self) -> ScrollOffset;

    fn inner_size(&self) -> ViewportSize;

    /// Attach the (single) native listener of `kind`. Passive: it never blocks scrolling.
    fn add_event_listener(&mut self, kind: ListenerKind);

    fn remove_event_listener(&mut self, kind: ListenerKind);

    /// Sample the current state, uncached
    fn read(&self) -> RawReading {
        RawReading {
            offset: self.scroll_offset(),
            viewport: self.inner_size(),
            at: self.now(),
        }
    }
}
