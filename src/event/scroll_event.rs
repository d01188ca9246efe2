use serde::Serialize;
use std::fmt;
use std::time::Instant;

/// Raw scroll offset read from the host, in (possibly fractional) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Host inner dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Dominant axis wins; vertical wins ties. `None` when there is no movement.
    pub fn from_delta(delta_x: f64, delta_y: f64) -> Option<Self> {
        if delta_x == 0.0 && delta_y == 0.0 {
            return None;
        }
        let direction = if delta_y.abs() >= delta_x.abs() {
            if delta_y > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            }
        } else if delta_x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        Some(direction)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::None => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized, immutable scroll reading delivered to consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollEvent {
    pub position_y: u32,
    pub position_x: u32,
    /// Signed movement since the last delivered frame
    pub delta_y: f64,
    pub delta_x: f64,
    pub direction: Direction,
    /// Vertical speed in px/s, never negative
    pub velocity: f64,
    #[serde(skip)]
    pub timestamp: Instant,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl ScrollEvent {
    pub fn viewport(&self) -> ViewportSize {
        ViewportSize::new(self.viewport_width, self.viewport_height)
    }
}

impl fmt::Display for ScrollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y={} x={} dy={:.0} dx={:.0} dir={} v={:.0}px/s viewport={}x{}",
            self.position_y,
            self.position_x,
            self.delta_y,
            self.delta_x,
            self.direction,
            self.velocity,
            self.viewport_width,
            self.viewport_height
        )
    }
}
