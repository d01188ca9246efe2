//! Terminal host for the coordinator
//!
//! A virtual document rendered with ratatui stands in for a browser page, so
//! every consumer can be watched reacting to real keyboard and wheel input.

mod demo_events;
mod demo_render;
mod demo_state;
mod document_scroll;
mod terminal_window;

pub use demo_state::Demo;
pub use document_scroll::DocumentScroll;
pub use terminal_window::{COLUMN_WIDTH_PX, ROW_HEIGHT_PX, TerminalWindow};
