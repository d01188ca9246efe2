use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::disposer::Disposer;
use super::registry::{Callback, Delivery, HandlerRegistration, Registry};
use crate::error::{HandlerResult, RegisterError, catch_handler_panic};
use crate::event::{DEFAULT_NOISE_THRESHOLD, Normalizer, ScrollEvent};
use crate::frame::{FrameBatcher, FrameHandle, FrameScheduler};
use crate::host::{ListenerKind, Window};
use crate::throttle::DEFAULT_THROTTLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No listeners, no frame loop, empty registry
    Idle,
    /// Listeners attached and the frame loop running
    Active,
}

/// Tunables applied when the coordinator is constructed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchOptions {
    /// Interval used by `register`
    pub default_throttle: Duration,
    /// Minimum movement (px) for a native event to count
    pub noise_threshold: f64,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            default_throttle: DEFAULT_THROTTLE,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
        }
    }
}

/// Running counters, mostly for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    pub native_events: u64,
    pub discarded_events: u64,
    pub frames: u64,
    pub deliveries: u64,
    pub handler_failures: u64,
}

struct Host {
    window: Box<dyn Window>,
    batcher: FrameBatcher,
    /// Present only while active; reseeded from the window on every activation
    normalizer: Option<Normalizer>,
}

pub(crate) struct Inner {
    registry: Registry,
    host: Option<Host>,
    options: DispatchOptions,
    stats: DispatchStats,
}

/// Handle to the scroll coordinator. Clones share the same coordinator.
#[derive(Clone)]
pub struct Coordinator {
    inner: Rc<RefCell<Inner>>,
}

impl Coordinator {
    pub fn new(window: impl Window + 'static, frames: impl FrameScheduler + 'static) -> Self {
        Self::with_options(window, frames, DispatchOptions::default())
    }

    pub fn with_options(
        window: impl Window + 'static,
        frames: impl FrameScheduler + 'static,
        options: DispatchOptions,
    ) -> Self {
        let host = Host {
            window: Box::new(window),
            batcher: FrameBatcher::new(Box::new(frames)),
            normalizer: None,
        };
        Self::build(Some(host), options)
    }

    /// Coordinator for contexts without a window. Registration validates its
    /// arguments and then does nothing.
    pub fn headless() -> Self {
        Self::build(None, DispatchOptions::default())
    }

    fn build(host: Option<Host>, options: DispatchOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                registry: Registry::default(),
                host,
                options,
                stats: DispatchStats::default(),
            })),
        }
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<Inner>>) -> Self {
        Self { inner }
    }

    /// Register `callback` under `id` with the default throttle interval
    pub fn register<F>(&self, id: &str, callback: F) -> Result<Disposer, RegisterError>
    where
        F: FnMut(&ScrollEvent) -> HandlerResult + 'static,
    {
        let interval = self.inner.borrow().options.default_throttle;
        self.register_throttled(id, interval, callback)
    }

    /// Register `callback` under `id`, delivering at most once per `interval`.
    ///
    /// Re-registering an existing id replaces its callback and throttle in place.
    pub fn register_throttled<F>(
        &self,
        id: &str,
        interval: Duration,
        callback: F,
    ) -> Result<Disposer, RegisterError>
    where
        F: FnMut(&ScrollEvent) -> HandlerResult + 'static,
    {
        if id.is_empty() {
            return Err(RegisterError::EmptyId);
        }
        if interval.is_zero() {
            return Err(RegisterError::InvalidThrottle {
                id: id.to_string(),
                interval,
            });
        }

        let mut inner = self.inner.borrow_mut();
        let Inner {
            registry,
            host,
            options,
            ..
        } = &mut *inner;

        let Some(host) = host.as_mut() else {
            #[cfg(debug_assertions)]
            log::debug!("No window available, ignoring registration of '{}'", id);
            return Ok(Disposer::noop());
        };

        let was_empty = registry.is_empty();
        let callback: Callback = Rc::new(RefCell::new(callback));
        #[cfg_attr(not(debug_assertions), allow(unused_variables))]
        let outcome = registry.upsert(HandlerRegistration::new(id.to_string(), interval, callback));

        #[cfg(debug_assertions)]
        log::debug!("Handler '{}' {:?} (throttle {:?})", id, outcome, interval);

        if was_empty {
            host.activate(options.noise_threshold);
        }

        Ok(Disposer::new(Rc::downgrade(&self.inner), id.to_string()))
    }

    /// Remove the handler registered under `id`. No-op if absent.
    pub fn unregister(&self, id: &str) {
        let mut inner = self.inner.borrow_mut();
        let Inner { registry, host, .. } = &mut *inner;

        if !registry.remove(id) {
            return;
        }

        #[cfg(debug_assertions)]
        log::debug!("Handler '{}' unregistered, {} remaining", id, registry.len());

        if registry.is_empty() {
            if let Some(host) = host.as_mut() {
                host.deactivate();
            }
        }
    }

    /// Pause or resume delivery to `id` without unregistering it.
    /// Returns false if `id` is not registered.
    pub fn set_active(&self, id: &str, active: bool) -> bool {
        self.inner.borrow_mut().registry.set_active(id, active)
    }

    /// Entry point for the host's native listeners
    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub fn handle_native_event(&self, kind: ListenerKind) {
        let mut inner = self.inner.borrow_mut();
        let Inner { host, stats, .. } = &mut *inner;

        let Some(host) = host.as_mut() else {
            return;
        };
        let Some(normalizer) = host.normalizer.as_mut() else {
            // Idle: no listener is attached, so this event was not ours
            return;
        };

        stats.native_events += 1;
        let reading = host.window.read();
        match normalizer.normalize(reading) {
            Some(event) => host.batcher.stash(event),
            None => {
                stats.discarded_events += 1;
                #[cfg(debug_assertions)]
                log::trace!("Discarded sub-threshold {:?} event", kind);
            }
        }
    }

    /// Entry point for the host's frame callback.
    ///
    /// Delivers the pending event (or due trailing events) to every eligible
    /// handler in registration order. No borrow is held while handlers run, so
    /// they may register, unregister or dispose freely; such changes apply from
    /// the next frame.
    pub fn on_frame(&self, handle: FrameHandle) {
        let deliveries = match self.begin_frame(handle) {
            Some(deliveries) => deliveries,
            None => return,
        };

        for delivery in deliveries {
            let result = invoke(&delivery);
            let mut inner = self.inner.borrow_mut();
            match result {
                Ok(()) => inner.stats.deliveries += 1,
                Err(err) => {
                    inner.stats.handler_failures += 1;
                    log::error!("Scroll handler '{}' failed: {}", delivery.id, err);
                }
            }
        }

        if let Some(host) = self.inner.borrow_mut().host.as_mut() {
            host.batcher.end_frame();
        }
    }

    fn begin_frame(&self, handle: FrameHandle) -> Option<Vec<Delivery>> {
        let mut inner = self.inner.borrow_mut();
        let Inner {
            registry,
            host,
            stats,
            ..
        } = &mut *inner;

        let host = host.as_mut()?;
        if !host.batcher.begin_frame(handle) {
            #[cfg(debug_assertions)]
            log::trace!("Ignoring stale frame {:?}", handle);
            return None;
        }
        stats.frames += 1;

        let event = host.batcher.take_pending();
        if event.is_some() {
            if let Some(normalizer) = host.normalizer.as_mut() {
                normalizer.commit();
            }
        }

        let now = host.window.now();
        Some(registry.collect_deliveries(now, event))
    }

    pub fn state(&self) -> CoordinatorState {
        let inner = self.inner.borrow();
        let active = inner
            .host
            .as_ref()
            .is_some_and(|host| host.normalizer.is_some());
        if active {
            CoordinatorState::Active
        } else {
            CoordinatorState::Idle
        }
    }

    pub fn handler_count(&self) -> usize {
        self.inner.borrow().registry.len()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.inner.borrow().registry.contains(id)
    }

    /// Registered ids in delivery order
    pub fn handler_ids(&self) -> Vec<String> {
        self.inner.borrow().registry.ids()
    }

    /// `None` if `id` is not registered
    pub fn is_handler_active(&self, id: &str) -> Option<bool> {
        self.inner.borrow().registry.is_active(id)
    }

    pub fn is_headless(&self) -> bool {
        self.inner.borrow().host.is_none()
    }

    pub fn stats(&self) -> DispatchStats {
        self.inner.borrow().stats
    }

    pub fn options(&self) -> DispatchOptions {
        self.inner.borrow().options
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Coordinator")
            .field("handlers", &inner.registry.ids())
            .field("headless", &inner.host.is_none())
            .field("stats", &inner.stats)
            .finish()
    }
}

impl Host {
    fn activate(&mut self, noise_threshold: f64) {
        for kind in ListenerKind::ALL {
            self.window.add_event_listener(kind);
        }
        // Seed from the live window so the first real event has a sane delta
        self.normalizer = Some(Normalizer::with_threshold(self.window.read(), noise_threshold));
        self.batcher.start();

        #[cfg(debug_assertions)]
        log::debug!("Scroll coordinator active");
    }

    fn deactivate(&mut self) {
        for kind in ListenerKind::ALL {
            self.window.remove_event_listener(kind);
        }
        self.normalizer = None;
        self.batcher.stop();

        #[cfg(debug_assertions)]
        log::debug!("Scroll coordinator idle");
    }
}

fn invoke(delivery: &Delivery) -> HandlerResult {
    let callback = &delivery.callback;
    let event = &delivery.event;
    let call = || {
        let mut callback = callback.borrow_mut();
        (&mut *callback)(event)
    };
    catch_handler_panic(call).and_then(|result| result)
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;
