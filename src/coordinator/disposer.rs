use std::cell::{Cell, RefCell};
use std::rc::Weak;

use super::dispatcher::{Coordinator, Inner};

/// Cancels one registration. Equivalent to `Coordinator::unregister(id)`.
///
/// Disposing more than once is a no-op. Dropping a disposer does not
/// unregister anything, and a disposer outliving its coordinator does nothing.
#[must_use = "dropping a Disposer leaves the handler registered"]
#[derive(Debug)]
pub struct Disposer {
    target: Option<Target>,
    disposed: Cell<bool>,
}

#[derive(Debug)]
struct Target {
    inner: Weak<RefCell<Inner>>,
    id: String,
}

impl Disposer {
    pub(crate) fn new(inner: Weak<RefCell<Inner>>, id: String) -> Self {
        Self {
            target: Some(Target { inner, id }),
            disposed: Cell::new(false),
        }
    }

    /// Disposer for a registration that never happened (headless host)
    pub fn noop() -> Self {
        Self {
            target: None,
            disposed: Cell::new(false),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.id.as_str())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let Some(target) = &self.target else {
            return;
        };
        if let Some(inner) = target.inner.upgrade() {
            Coordinator::from_inner(inner).unregister(&target.id);
        }
    }
}
