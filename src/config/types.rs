// Configuration type definitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::consumers::{DEFAULT_FADE_START_RATIO, DEFAULT_PARALLAX_MULTIPLIER};
use crate::coordinator::DispatchOptions;
use crate::event::DEFAULT_NOISE_THRESHOLD;
use crate::frame::DEFAULT_FRAME_INTERVAL;
use crate::throttle::DEFAULT_THROTTLE;

/// Coordinator tuning section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_throttle_ms")]
    pub default_throttle_ms: u64,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_noise_threshold_px")]
    pub noise_threshold_px: f64,
}

fn default_throttle_ms() -> u64 {
    DEFAULT_THROTTLE.as_millis() as u64
}

fn default_frame_interval_ms() -> u64 {
    DEFAULT_FRAME_INTERVAL.as_millis() as u64
}

fn default_noise_threshold_px() -> f64 {
    DEFAULT_NOISE_THRESHOLD
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            default_throttle_ms: default_throttle_ms(),
            frame_interval_ms: default_frame_interval_ms(),
            noise_threshold_px: default_noise_threshold_px(),
        }
    }
}

impl DispatchConfig {
    /// Zero intervals are not valid throttles; they fall back to the defaults.
    pub fn to_dispatch_options(&self) -> DispatchOptions {
        let default_throttle = match self.default_throttle_ms {
            0 => DEFAULT_THROTTLE,
            ms => Duration::from_millis(ms),
        };
        DispatchOptions {
            default_throttle,
            noise_threshold: self.noise_threshold_px.max(0.0),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        match self.frame_interval_ms {
            0 => DEFAULT_FRAME_INTERVAL,
            ms => Duration::from_millis(ms),
        }
    }
}

/// Parallax consumer section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_multiplier() -> f64 {
    DEFAULT_PARALLAX_MULTIPLIER
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        ParallaxConfig {
            multiplier: default_multiplier(),
        }
    }
}

/// Fade consumer section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeConfig {
    #[serde(default = "default_start_ratio")]
    pub start_ratio: f64,
}

fn default_start_ratio() -> f64 {
    DEFAULT_FADE_START_RATIO
}

impl Default for FadeConfig {
    fn default() -> Self {
        FadeConfig {
            start_ratio: default_start_ratio(),
        }
    }
}

/// Delivery monitor section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_monitor_enabled")]
    pub enabled: bool,
    #[serde(default = "default_summary_interval_ms")]
    pub summary_interval_ms: u64,
}

fn default_monitor_enabled() -> bool {
    cfg!(debug_assertions)
}

fn default_summary_interval_ms() -> u64 {
    1000
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            enabled: default_monitor_enabled(),
            summary_interval_ms: default_summary_interval_ms(),
        }
    }
}

impl MonitorConfig {
    pub fn summary_interval(&self) -> Duration {
        Duration::from_millis(self.summary_interval_ms.max(1))
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub fade: FadeConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl Config {
    /// Reset non-finite float settings to their defaults.
    ///
    /// TOML accepts `nan` and `inf`, which no consumer can use. Returns the
    /// keys that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();
        if !self.dispatch.noise_threshold_px.is_finite() {
            self.dispatch.noise_threshold_px = default_noise_threshold_px();
            reset.push("dispatch.noise_threshold_px");
        }
        if !self.parallax.multiplier.is_finite() {
            self.parallax.multiplier = default_multiplier();
            reset.push("parallax.multiplier");
        }
        if !self.fade.start_ratio.is_finite() {
            self.fade.start_ratio = default_start_ratio();
            reset.push("fade.start_ratio");
        }
        reset
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
