use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::document_scroll::DocumentScroll;
use super::terminal_window::TerminalWindow;
use crate::config::Config;
use crate::consumers::{DeliveryMonitor, Fade, MonitorReport, Parallax, ViewportTracker};
use crate::coordinator::{Coordinator, Disposer};
use crate::error::RegisterError;
use crate::event::ScrollEvent;
use crate::frame::IntervalFrames;
use crate::host::{ListenerKind, Window};

/// Upper bound on how long the loop blocks waiting for input
const MAX_IDLE_WAIT: Duration = Duration::from_millis(100);

/// Terminal demo hosting one coordinator and every consumer adapter
pub struct Demo {
    pub coordinator: Coordinator,
    pub window: TerminalWindow,
    pub frames: IntervalFrames,
    pub viewport: ViewportTracker,
    pub parallax: Parallax,
    pub fade: Fade,
    pub monitor: DeliveryMonitor,
    last_event: Rc<Cell<Option<ScrollEvent>>>,
    disposers: Vec<Disposer>,
    pub parallax_paused: bool,
    pub notification: Option<String>,
    should_quit: bool,
    dirty: bool,
}

impl Demo {
    pub fn new(
        config: &Config,
        window: TerminalWindow,
        frames: IntervalFrames,
    ) -> Result<Self, RegisterError> {
        let coordinator = Coordinator::with_options(
            window.clone(),
            frames.clone(),
            config.dispatch.to_dispatch_options(),
        );

        let viewport = ViewportTracker::default();
        let parallax = Parallax::new("parallax", config.parallax.multiplier);
        let fade = Fade::new("fade", config.fade.start_ratio);
        let monitor = DeliveryMonitor::new(
            "monitor",
            config.monitor.enabled,
            config.monitor.summary_interval(),
        );
        let last_event = Rc::new(Cell::new(None));

        let mut disposers = vec![
            viewport.attach(&coordinator)?,
            parallax.attach(&coordinator)?,
            fade.attach(&coordinator)?,
        ];
        let clock = window.clone();
        disposers.push(monitor.attach(&coordinator, move || clock.now())?);

        let sink = Rc::clone(&last_event);
        disposers.push(coordinator.register("status", move |event: &ScrollEvent| {
            sink.set(Some(*event));
            Ok(())
        })?);

        Ok(Self {
            coordinator,
            window,
            frames,
            viewport,
            parallax,
            fade,
            monitor,
            last_event,
            disposers,
            parallax_paused: false,
            notification: None,
            should_quit: false,
            dirty: true,
        })
    }

    pub fn last_event(&self) -> Option<ScrollEvent> {
        self.last_event.get()
    }

    /// Run the frame callback if one is due. Returns true if a frame ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.monitor.flush(now);
        match self.frames.poll_due(now) {
            Some(handle) => {
                let before = self.coordinator.stats().deliveries;
                self.coordinator.on_frame(handle);
                if self.coordinator.stats().deliveries != before {
                    self.dirty = true;
                }
                true
            }
            None => false,
        }
    }

    /// How long the event loop may block before the next frame is due
    pub fn idle_wait(&self, now: Instant) -> Duration {
        self.frames
            .time_until_due(now)
            .map_or(MAX_IDLE_WAIT, |wait| wait.min(MAX_IDLE_WAIT))
    }

    /// Move the document and report the change as a native event of `kind`
    pub fn scroll_with(&mut self, kind: ListenerKind, f: impl FnOnce(&mut DocumentScroll)) {
        if self.window.update_scroll(f) {
            self.coordinator.handle_native_event(kind);
            self.dirty = true;
        }
    }

    /// Resize the document pane, reporting it to the coordinator if it changed
    pub fn resize_pane(&mut self, cols: u16, rows: u16) {
        if self.window.resize(cols, rows) {
            self.coordinator.handle_native_event(ListenerKind::Resize);
            self.dirty = true;
        }
    }

    pub fn toggle_parallax(&mut self) {
        self.parallax_paused = !self.parallax_paused;
        self.coordinator
            .set_active(self.parallax.id(), !self.parallax_paused);
        self.dirty = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Unregister every handler and return the final delivery report
    pub fn shutdown(mut self) -> MonitorReport {
        for disposer in self.disposers.drain(..) {
            disposer.dispose();
        }

        #[cfg(debug_assertions)]
        log::debug!("Demo shut down: {:?}", self.coordinator.stats());

        self.monitor.report()
    }
}

#[cfg(test)]
#[path = "demo_state_tests.rs"]
mod demo_state_tests;
