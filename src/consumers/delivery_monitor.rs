use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::coordinator::{Coordinator, Disposer};
use crate::error::RegisterError;
use crate::event::ScrollEvent;
use crate::throttle::Throttled;

/// Number of intervals kept for the rolling statistics
const SAMPLE_COUNT: usize = 120;

/// Snapshot of delivery cadence
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonitorReport {
    pub deliveries: u64,
    pub average_interval_ms: f64,
    pub p95_interval_ms: f64,
    pub max_gap_ms: f64,
    pub deliveries_per_sec: f64,
}

impl fmt::Display for MonitorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} deliveries, avg {:.1}ms, p95 {:.1}ms, max gap {:.1}ms, {:.1}/s",
            self.deliveries,
            self.average_interval_ms,
            self.p95_interval_ms,
            self.max_gap_ms,
            self.deliveries_per_sec
        )
    }
}

type SummaryLog = Throttled<MonitorReport, fn(MonitorReport)>;

struct MonitorState {
    /// Recent gaps between deliveries in milliseconds
    intervals: VecDeque<f64>,
    deliveries: u64,
    first: Option<Instant>,
    last: Option<Instant>,
    max_gap_ms: f64,
    summary: SummaryLog,
}

impl MonitorState {
    fn record(&mut self, now: Instant) {
        if let Some(last) = self.last {
            let gap = now.saturating_duration_since(last).as_micros() as f64 / 1000.0;
            if self.intervals.len() >= SAMPLE_COUNT {
                self.intervals.pop_front();
            }
            self.intervals.push_back(gap);
            self.max_gap_ms = self.max_gap_ms.max(gap);
        }
        self.first.get_or_insert(now);
        self.last = Some(now);
        self.deliveries += 1;

        let report = self.report();
        self.summary.call(now, report);
    }

    fn average(&self) -> f64 {
        if self.intervals.is_empty() {
            0.0
        } else {
            self.intervals.iter().sum::<f64>() / self.intervals.len() as f64
        }
    }

    fn p95(&self) -> f64 {
        if self.intervals.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.intervals.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }

    fn report(&self) -> MonitorReport {
        let span = match (self.first, self.last) {
            (Some(first), Some(last)) => last.saturating_duration_since(first).as_secs_f64(),
            _ => 0.0,
        };
        let deliveries_per_sec = if span > 0.0 {
            (self.deliveries - 1) as f64 / span
        } else {
            0.0
        };
        MonitorReport {
            deliveries: self.deliveries,
            average_interval_ms: self.average(),
            p95_interval_ms: self.p95(),
            max_gap_ms: self.max_gap_ms,
            deliveries_per_sec,
        }
    }
}

fn log_summary(report: MonitorReport) {
    log::info!("Scroll delivery: {}", report);
}

/// Samples how regularly scroll events actually reach consumers.
///
/// Off by default in release builds. Summaries go to the log at most once per
/// `summary_interval`; the last one is written when the host calls `flush`.
#[derive(Clone)]
pub struct DeliveryMonitor {
    id: String,
    enabled: bool,
    state: Rc<RefCell<MonitorState>>,
}

impl DeliveryMonitor {
    pub fn new(id: impl Into<String>, enabled: bool, summary_interval: Duration) -> Self {
        let id = id.into();
        let summary: SummaryLog = Throttled::new(
            format!("{}-summary", id),
            summary_interval,
            log_summary as fn(MonitorReport),
        );
        Self {
            id,
            enabled,
            state: Rc::new(RefCell::new(MonitorState {
                intervals: VecDeque::with_capacity(SAMPLE_COUNT),
                deliveries: 0,
                first: None,
                last: None,
                max_gap_ms: 0.0,
                summary,
            })),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Register with the coordinator, sampling delivery times from `clock`.
    /// A disabled monitor registers nothing.
    pub fn attach<C>(&self, coordinator: &Coordinator, clock: C) -> Result<Disposer, RegisterError>
    where
        C: Fn() -> Instant + 'static,
    {
        if !self.enabled {
            #[cfg(debug_assertions)]
            log::debug!("Delivery monitor '{}' disabled", self.id);
            return Ok(Disposer::noop());
        }
        let state = Rc::clone(&self.state);
        coordinator.register(&self.id, move |_: &ScrollEvent| {
            state.borrow_mut().record(clock());
            Ok(())
        })
    }

    pub fn record(&self, now: Instant) {
        self.state.borrow_mut().record(now);
    }

    /// Log the trailing summary if it is due
    pub fn flush(&self, now: Instant) -> bool {
        self.state.borrow_mut().summary.flush(now)
    }

    pub fn report(&self) -> MonitorReport {
        self.state.borrow().report()
    }
}

impl fmt::Debug for DeliveryMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryMonitor")
            .field("id", &self.id)
            .field("enabled", &self.enabled)
            .field("report", &self.report())
            .finish()
    }
}

#[cfg(test)]
#[path = "delivery_monitor_tests.rs"]
mod delivery_monitor_tests;
