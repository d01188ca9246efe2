use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io::stdout;
use std::rc::Rc;
use std::time::Instant;

use super::document_scroll::DocumentScroll;
use crate::event::{ScrollOffset, ViewportSize};
use crate::host::{ListenerKind, Window};

/// Height of one document row in virtual pixels
pub const ROW_HEIGHT_PX: u32 = 20;
/// Width of one terminal column in virtual pixels
pub const COLUMN_WIDTH_PX: u32 = 8;

#[derive(Debug)]
struct WindowState {
    scroll: DocumentScroll,
    cols: u16,
    listening: HashSet<ListenerKind>,
    mouse_capture: bool,
}

/// Presents the document pane of the terminal as a scrollable window.
///
/// Rows and columns map to virtual pixels so consumers see browser-like
/// values. Clones share state: the coordinator owns one, the demo keeps one to
/// move the document.
#[derive(Debug, Clone)]
pub struct TerminalWindow {
    state: Rc<RefCell<WindowState>>,
    owns_terminal: bool,
}

impl TerminalWindow {
    pub fn new(lines: u32, cols: u16, rows: u16) -> Self {
        let mut scroll = DocumentScroll::new(lines);
        scroll.update_bounds(u32::from(rows));
        Self {
            state: Rc::new(RefCell::new(WindowState {
                scroll,
                cols,
                listening: HashSet::new(),
                mouse_capture: false,
            })),
            owns_terminal: false,
        }
    }

    /// Toggle crossterm mouse capture together with the wheel listener
    pub fn with_mouse_capture(mut self) -> Self {
        self.owns_terminal = true;
        self
    }

    pub fn scroll(&self) -> DocumentScroll {
        self.state.borrow().scroll
    }

    /// Apply `f` to the document position. Returns true if the offset moved.
    pub fn update_scroll(&self, f: impl FnOnce(&mut DocumentScroll)) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.scroll.offset;
        f(&mut state.scroll);
        state.scroll.offset != before
    }

    /// Returns true if the pane size changed
    pub fn resize(&self, cols: u16, rows: u16) -> bool {
        let mut state = self.state.borrow_mut();
        if state.cols == cols && state.scroll.viewport_rows == u32::from(rows) {
            return false;
        }
        state.cols = cols;
        state.scroll.update_bounds(u32::from(rows));
        true
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.state.borrow().listening.contains(&kind)
    }

    pub fn mouse_capture(&self) -> bool {
        self.state.borrow().mouse_capture
    }

    fn set_mouse_capture(&self, enabled: bool) {
        let mut state = self.state.borrow_mut();
        if state.mouse_capture == enabled {
            return;
        }
        state.mouse_capture = enabled;
        if !self.owns_terminal {
            return;
        }
        let result = if enabled {
            execute!(stdout(), EnableMouseCapture)
        } else {
            execute!(stdout(), DisableMouseCapture)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle mouse capture: {}", e);
        }
    }
}

impl Window for TerminalWindow {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn scroll_offset(&self) -> ScrollOffset {
        let offset = self.state.borrow().scroll.offset;
        ScrollOffset::new(0.0, f64::from(offset.saturating_mul(ROW_HEIGHT_PX)))
    }

    fn inner_size(&self) -> ViewportSize {
        let state = self.state.borrow();
        ViewportSize::new(
            u32::from(state.cols) * COLUMN_WIDTH_PX,
            state.scroll.viewport_rows.saturating_mul(ROW_HEIGHT_PX),
        )
    }

    fn add_event_listener(&mut self, kind: ListenerKind) {
        self.state.borrow_mut().listening.insert(kind);
        if kind == ListenerKind::Wheel {
            self.set_mouse_capture(true);
        }
    }

    fn remove_event_listener(&mut self, kind: ListenerKind) {
        self.state.borrow_mut().listening.remove(&kind);
        if kind == ListenerKind::Wheel {
            self.set_mouse_capture(false);
        }
    }
}
