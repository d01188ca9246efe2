use std::cell::Cell;
use std::rc::Rc;

use crate::coordinator::{Coordinator, Disposer};
use crate::error::RegisterError;
use crate::event::ScrollEvent;

pub const DEFAULT_PARALLAX_MULTIPLIER: f64 = 0.5;

pub fn parallax_offset(position_y: u32, multiplier: f64) -> f64 {
    f64::from(position_y) * multiplier
}

/// Background offset that trails the scroll position by a constant factor
#[derive(Debug, Clone)]
pub struct Parallax {
    id: String,
    multiplier: f64,
    offset: Rc<Cell<f64>>,
}

impl Parallax {
    pub fn new(id: impl Into<String>, multiplier: f64) -> Self {
        Self {
            id: id.into(),
            multiplier,
            offset: Rc::new(Cell::new(0.0)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn attach(&self, coordinator: &Coordinator) -> Result<Disposer, RegisterError> {
        let offset = Rc::clone(&self.offset);
        let multiplier = self.multiplier;
        coordinator.register(&self.id, move |event: &ScrollEvent| {
            offset.set(parallax_offset(event.position_y, multiplier));
            Ok(())
        })
    }

    pub fn offset(&self) -> f64 {
        self.offset.get()
    }
}
