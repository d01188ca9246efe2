use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::io;
use std::time::Duration;

use super::demo_state::Demo;
use crate::host::ListenerKind;

/// Rows moved per mouse wheel notch
const WHEEL_SCROLL_ROWS: u32 = 3;

impl Demo {
    /// Wait up to `timeout` for one terminal event and apply it
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_with(ListenerKind::Scroll, |s| s.scroll_down(1));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_with(ListenerKind::Scroll, |s| s.scroll_up(1));
            }
            KeyCode::PageDown => self.scroll_with(ListenerKind::Scroll, |s| s.page_down()),
            KeyCode::PageUp => self.scroll_with(ListenerKind::Scroll, |s| s.page_up()),
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll_with(ListenerKind::Scroll, |s| s.jump_to_top());
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.scroll_with(ListenerKind::Scroll, |s| s.jump_to_bottom());
            }
            KeyCode::Char('p') => self.toggle_parallax(),
            _ => {}
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.scroll_with(ListenerKind::Wheel, |s| s.scroll_down(WHEEL_SCROLL_ROWS));
            }
            MouseEventKind::ScrollUp => {
                self.scroll_with(ListenerKind::Wheel, |s| s.scroll_up(WHEEL_SCROLL_ROWS));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo::TerminalWindow;
    use crate::frame::IntervalFrames;
    use ratatui::crossterm::event::KeyEventState;

    fn demo() -> Demo {
        Demo::new(
            &Config::default(),
            TerminalWindow::new(400, 100, 30),
            IntervalFrames::default(),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_row_keys() {
        let mut demo = demo();
        demo.handle_key_event(key(KeyCode::Char('j')));
        demo.handle_key_event(key(KeyCode::Down));
        assert_eq!(demo.window.scroll().offset, 2);

        demo.handle_key_event(key(KeyCode::Char('k')));
        assert_eq!(demo.window.scroll().offset, 1);
    }

    #[test]
    fn test_page_and_jump_keys() {
        let mut demo = demo();
        demo.handle_key_event(key(KeyCode::PageDown));
        assert_eq!(demo.window.scroll().offset, 15);

        demo.handle_key_event(key(KeyCode::Char('G')));
        assert_eq!(demo.window.scroll().offset, 370);

        demo.handle_key_event(key(KeyCode::PageUp));
        assert_eq!(demo.window.scroll().offset, 355);

        demo.handle_key_event(key(KeyCode::Char('g')));
        assert_eq!(demo.window.scroll().offset, 0);
    }

    #[test]
    fn test_wheel_counts_as_wheel_event() {
        let mut demo = demo();
        demo.handle_mouse_event(wheel(MouseEventKind::ScrollDown));
        assert_eq!(demo.window.scroll().offset, WHEEL_SCROLL_ROWS);
        assert_eq!(demo.coordinator.stats().native_events, 1);

        demo.handle_mouse_event(wheel(MouseEventKind::Moved));
        assert_eq!(demo.coordinator.stats().native_events, 1);
    }

    #[test]
    fn test_parallax_toggle_key() {
        let mut demo = demo();
        demo.handle_key_event(key(KeyCode::Char('p')));
        assert!(demo.parallax_paused);
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut demo = demo();
            demo.handle_key_event(key(code));
            assert!(demo.should_quit());
        }

        let mut demo = demo();
        demo.handle_key_event(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert!(demo.should_quit());
    }
}
