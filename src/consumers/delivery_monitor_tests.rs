//! Tests for delivery_monitor

use super::*;
use crate::host::Window;
use crate::test_utils::test_helpers::Harness;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn monitor() -> DeliveryMonitor {
    DeliveryMonitor::new("monitor", true, ms(1000))
}

#[test]
fn test_empty_report() {
    assert_eq!(monitor().report(), MonitorReport::default());
}

#[test]
fn test_single_delivery_has_no_interval() {
    let monitor = monitor();
    monitor.record(Instant::now());

    let report = monitor.report();
    assert_eq!(report.deliveries, 1);
    assert_eq!(report.average_interval_ms, 0.0);
    assert_eq!(report.deliveries_per_sec, 0.0);
}

#[test]
fn test_steady_cadence() {
    let t0 = Instant::now();
    let monitor = monitor();
    for i in 0..11 {
        monitor.record(t0 + ms(20 * i));
    }

    let report = monitor.report();
    assert_eq!(report.deliveries, 11);
    assert!((report.average_interval_ms - 20.0).abs() < 1e-9);
    assert!((report.p95_interval_ms - 20.0).abs() < 1e-9);
    assert!((report.max_gap_ms - 20.0).abs() < 1e-9);
    assert!((report.deliveries_per_sec - 50.0).abs() < 1e-9);
}

#[test]
fn test_max_gap_and_p95_catch_stalls() {
    let t0 = Instant::now();
    let monitor = monitor();
    let mut at = t0;
    monitor.record(at);
    for i in 0..40 {
        at += if i == 10 || i == 20 { ms(500) } else { ms(16) };
        monitor.record(at);
    }

    let report = monitor.report();
    assert!((report.max_gap_ms - 500.0).abs() < 1e-9);
    assert!((report.p95_interval_ms - 500.0).abs() < 1e-9);
    assert!(report.average_interval_ms > 16.0);
}

#[test]
fn test_rolling_window_forgets_old_intervals() {
    let t0 = Instant::now();
    let monitor = monitor();
    let mut at = t0;
    monitor.record(at);
    at += ms(400);
    monitor.record(at);
    for _ in 0..SAMPLE_COUNT {
        at += ms(10);
        monitor.record(at);
    }

    let report = monitor.report();
    assert!((report.average_interval_ms - 10.0).abs() < 1e-9);
    // The all-time max survives the rolling window
    assert!((report.max_gap_ms - 400.0).abs() < 1e-9);
}

#[test]
fn test_attach_samples_deliveries() {
    let harness = Harness::new();
    let monitor = monitor();
    let window = harness.window.clone();
    let _disposer = monitor
        .attach(&harness.coordinator, move || window.now())
        .unwrap();

    for y in [10.0, 20.0, 30.0] {
        harness.scroll_to(y);
        harness.frame_after(16);
    }

    let report = monitor.report();
    assert_eq!(report.deliveries, 3);
    assert!((report.average_interval_ms - 16.0).abs() < 1e-9);
}

#[test]
fn test_disabled_monitor_registers_nothing() {
    let harness = Harness::new();
    let monitor = DeliveryMonitor::new("monitor", false, ms(1000));
    let disposer = monitor
        .attach(&harness.coordinator, Instant::now)
        .unwrap();

    assert_eq!(disposer.id(), None);
    assert!(!harness.coordinator.is_registered("monitor"));
    assert_eq!(harness.window.total_listeners(), 0);
}

#[test]
fn test_flush_without_pending_summary() {
    let monitor = monitor();
    let t0 = Instant::now();
    monitor.record(t0);
    // The first summary is logged on the leading edge
    assert!(!monitor.flush(t0 + ms(2000)));

    monitor.record(t0 + ms(10));
    assert!(monitor.flush(t0 + ms(2000)));
}

#[test]
fn test_report_serializes() {
    let t0 = Instant::now();
    let monitor = monitor();
    monitor.record(t0);
    monitor.record(t0 + ms(16));

    let json = serde_json::to_value(monitor.report()).unwrap();
    assert_eq!(json["deliveries"], 2);
    assert_eq!(json["max_gap_ms"], 16.0);
}
