use std::time::Instant;

use super::scroll_event::{Direction, ScrollEvent, ScrollOffset, ViewportSize};

/// Movement below this many pixels on both axes is treated as rounding noise
pub const DEFAULT_NOISE_THRESHOLD: f64 = 1.0;

/// One raw sample of host state, taken when a native event fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub offset: ScrollOffset,
    pub viewport: ViewportSize,
    pub at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Baseline {
    offset: ScrollOffset,
    at: Instant,
}

/// Turns raw readings into `ScrollEvent`s.
///
/// Two baselines are tracked. Noise filtering compares against the last
/// accepted native reading; deltas and velocity are measured from the last
/// delivered frame so a frame that coalesces several native events reports
/// their combined movement.
#[derive(Debug, Clone)]
pub struct Normalizer {
    threshold: f64,
    native: Baseline,
    native_viewport: ViewportSize,
    delivered: Baseline,
    direction: Direction,
}

impl Normalizer {
    /// Seed both baselines from the current host state
    pub fn new(initial: RawReading) -> Self {
        Self::with_threshold(initial, DEFAULT_NOISE_THRESHOLD)
    }

    pub fn with_threshold(initial: RawReading, threshold: f64) -> Self {
        let baseline = Baseline {
            offset: initial.offset,
            at: initial.at,
        };
        Self {
            threshold: threshold.max(0.0),
            native: baseline,
            native_viewport: initial.viewport,
            delivered: baseline,
            direction: Direction::None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Normalize a reading, or `None` if it is sub-threshold noise.
    ///
    /// Discarded readings leave the baselines untouched, so slow sub-pixel
    /// drift still produces an event once it adds up.
    pub fn normalize(&mut self, reading: RawReading) -> Option<ScrollEvent> {
        let native_dy = reading.offset.y - self.native.offset.y;
        let native_dx = reading.offset.x - self.native.offset.x;
        let resized = reading.viewport != self.native_viewport;

        if native_dy.abs() < self.threshold && native_dx.abs() < self.threshold && !resized {
            return None;
        }

        self.native = Baseline {
            offset: reading.offset,
            at: reading.at,
        };
        self.native_viewport = reading.viewport;

        let delta_y = reading.offset.y - self.delivered.offset.y;
        let delta_x = reading.offset.x - self.delivered.offset.x;
        if let Some(direction) = Direction::from_delta(delta_x, delta_y) {
            self.direction = direction;
        }

        let elapsed = reading
            .at
            .saturating_duration_since(self.delivered.at)
            .as_secs_f64();
        let velocity = if elapsed > 0.0 {
            delta_y.abs() / elapsed
        } else {
            0.0
        };

        Some(ScrollEvent {
            position_y: to_pixels(reading.offset.y),
            position_x: to_pixels(reading.offset.x),
            delta_y,
            delta_x,
            direction: self.direction,
            velocity,
            timestamp: reading.at,
            viewport_width: reading.viewport.width,
            viewport_height: reading.viewport.height,
        })
    }

    /// Mark the most recent normalized event as delivered
    pub fn commit(&mut self) {
        self.delivered = self.native;
    }
}

fn to_pixels(raw: f64) -> u32 {
    // `as` saturates for out-of-range floats and maps NaN to 0
    raw.max(0.0).round() as u32
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod normalizer_tests;
