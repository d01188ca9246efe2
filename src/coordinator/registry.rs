use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::error::HandlerResult;
use crate::event::ScrollEvent;
use crate::throttle::Throttle;

pub(crate) type Callback = Rc<RefCell<dyn FnMut(&ScrollEvent) -> HandlerResult>>;

pub(crate) struct HandlerRegistration {
    id: String,
    callback: Callback,
    throttle: Throttle<ScrollEvent>,
    active: bool,
}

impl HandlerRegistration {
    pub fn new(id: String, interval: Duration, callback: Callback) -> Self {
        Self {
            id,
            callback,
            throttle: Throttle::new(interval),
            active: true,
        }
    }
}

/// One handler selected for the current frame
pub(crate) struct Delivery {
    pub id: String,
    pub callback: Callback,
    pub event: ScrollEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upsert {
    Inserted,
    Replaced,
}

/// Handlers in registration order
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<HandlerRegistration>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn is_active(&self, id: &str) -> Option<bool> {
        self.position(id).map(|i| self.entries[i].active)
    }

    /// Insert, or replace in place keeping the original registry position
    pub fn upsert(&mut self, registration: HandlerRegistration) -> Upsert {
        match self.position(&registration.id) {
            Some(i) => {
                self.entries[i] = registration;
                Upsert::Replaced
            }
            None => {
                self.entries.push(registration);
                Upsert::Inserted
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Returns false if `id` is not registered
    pub fn set_active(&mut self, id: &str, active: bool) -> bool {
        let Some(i) = self.position(id) else {
            return false;
        };
        let entry = &mut self.entries[i];
        entry.active = active;
        if !active {
            // A stale trailing event must not fire on reactivation
            entry.throttle.cancel();
        }
        true
    }

    /// Pick the handlers that receive something this frame.
    ///
    /// With a fresh event each active handler offers it to its throttle; without
    /// one, due trailing events are released. Either way a handler is selected
    /// at most once.
    pub fn collect_deliveries(&mut self, now: Instant, event: Option<ScrollEvent>) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| e.active) {
            let released = match event {
                Some(event) => entry.throttle.offer(now, event),
                None => entry.throttle.poll(now),
            };
            if let Some(event) = released {
                deliveries.push(Delivery {
                    id: entry.id.clone(),
                    callback: Rc::clone(&entry.callback),
                    event,
                });
            }
        }
        deliveries
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
