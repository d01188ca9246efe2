//! Tests for frame_scheduler

use super::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_interval_first_frame_fires_immediately() {
    let t0 = Instant::now();
    let mut frames = IntervalFrames::new(ms(16));

    let handle = frames.request_frame();
    assert_eq!(frames.time_until_due(t0), Some(Duration::ZERO));
    assert_eq!(frames.poll_due(t0), Some(handle));
    assert!(!frames.is_requested());
}

#[test]
fn test_interval_waits_between_frames() {
    let t0 = Instant::now();
    let mut frames = IntervalFrames::new(ms(16));

    frames.request_frame();
    frames.poll_due(t0);

    let second = frames.request_frame();
    assert_eq!(frames.poll_due(t0 + ms(10)), None);
    assert_eq!(frames.time_until_due(t0 + ms(10)), Some(ms(6)));
    assert_eq!(frames.poll_due(t0 + ms(16)), Some(second));
}

#[test]
fn test_interval_nothing_due_without_request() {
    let t0 = Instant::now();
    let frames = IntervalFrames::new(ms(16));
    assert_eq!(frames.poll_due(t0), None);
    assert_eq!(frames.time_until_due(t0), None);
}

#[test]
fn test_interval_cancel_only_matching_handle() {
    let t0 = Instant::now();
    let mut frames = IntervalFrames::new(ms(16));

    let stale = frames.request_frame();
    let current = frames.request_frame();
    frames.cancel_frame(stale);
    assert!(frames.is_requested());

    frames.cancel_frame(current);
    assert!(!frames.is_requested());
    assert_eq!(frames.poll_due(t0), None);
}

#[test]
fn test_interval_clones_share_state() {
    let t0 = Instant::now();
    let frames = IntervalFrames::default();
    let mut for_coordinator = frames.clone();

    let handle = for_coordinator.request_frame();
    assert_eq!(frames.poll_due(t0), Some(handle));
    assert_eq!(frames.interval(), DEFAULT_FRAME_INTERVAL);
}

#[test]
fn test_manual_handles_are_unique() {
    let mut frames = ManualFrames::new();
    let a = frames.request_frame();
    let b = frames.request_frame();
    assert_ne!(a, b);
    assert!(b.id() > a.id());
    assert_eq!(frames.request_count(), 2);
}

#[test]
fn test_manual_take_clears_request() {
    let mut frames = ManualFrames::new();
    let handle = frames.request_frame();

    assert_eq!(frames.requested(), Some(handle));
    assert_eq!(frames.take_requested(), Some(handle));
    assert_eq!(frames.take_requested(), None);
}

#[test]
fn test_manual_cancel_counts() {
    let mut frames = ManualFrames::new();
    let handle = frames.request_frame();

    frames.cancel_frame(handle);
    frames.cancel_frame(handle);
    assert_eq!(frames.cancel_count(), 1);
    assert_eq!(frames.requested(), None);
}
