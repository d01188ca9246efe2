use std::cell::Cell;
use std::rc::Rc;

use crate::coordinator::{Coordinator, Disposer};
use crate::error::RegisterError;
use crate::event::{ScrollEvent, ViewportSize};

/// Republishes the viewport size carried by every delivered event
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    id: String,
    size: Rc<Cell<Option<ViewportSize>>>,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new("viewport")
    }
}

impl ViewportTracker {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            size: Rc::new(Cell::new(None)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attach(&self, coordinator: &Coordinator) -> Result<Disposer, RegisterError> {
        let size = Rc::clone(&self.size);
        coordinator.register(&self.id, move |event: &ScrollEvent| {
            size.set(Some(event.viewport()));
            Ok(())
        })
    }

    /// `None` until the first delivery
    pub fn viewport(&self) -> Option<ViewportSize> {
        self.size.get()
    }
}
