use std::cell::Cell;
use std::rc::Rc;

use crate::coordinator::{Coordinator, Disposer};
use crate::error::RegisterError;
use crate::event::ScrollEvent;

/// Fraction of the viewport height scrolled before fading starts
pub const DEFAULT_FADE_START_RATIO: f64 = 0.25;

/// Opacity in `[0, 1]` for a fade-on-scroll element.
///
/// Fully opaque until `position_y` reaches `start_ratio * viewport_height`,
/// then linear down to 0 across the rest of the viewport height. A non-finite
/// `start_ratio` is treated as [`DEFAULT_FADE_START_RATIO`].
pub fn fade_opacity(position_y: u32, viewport_height: u32, start_ratio: f64) -> f64 {
    let start_ratio = if start_ratio.is_finite() {
        start_ratio.clamp(0.0, 1.0)
    } else {
        DEFAULT_FADE_START_RATIO
    };
    let height = f64::from(viewport_height);
    let start = height * start_ratio;
    let y = f64::from(position_y);

    if y <= start {
        return 1.0;
    }
    let span = height - start;
    if span <= 0.0 {
        return 0.0;
    }
    (1.0 - (y - start) / span).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct Fade {
    id: String,
    start_ratio: f64,
    opacity: Rc<Cell<f64>>,
}

impl Fade {
    pub fn new(id: impl Into<String>, start_ratio: f64) -> Self {
        Self {
            id: id.into(),
            start_ratio,
            opacity: Rc::new(Cell::new(1.0)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attach(&self, coordinator: &Coordinator) -> Result<Disposer, RegisterError> {
        let opacity = Rc::clone(&self.opacity);
        let start_ratio = self.start_ratio;
        coordinator.register(&self.id, move |event: &ScrollEvent| {
            opacity.set(fade_opacity(
                event.position_y,
                event.viewport_height,
                start_ratio,
            ));
            Ok(())
        })
    }

    pub fn opacity(&self) -> f64 {
        self.opacity.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::Harness;
    use proptest::prelude::*;

    #[test]
    fn test_opaque_before_start() {
        assert_eq!(fade_opacity(0, 800, 0.25), 1.0);
        assert_eq!(fade_opacity(200, 800, 0.25), 1.0);
    }

    #[test]
    fn test_linear_fade() {
        // start at 200, span 600
        assert_eq!(fade_opacity(500, 800, 0.25), 0.5);
        assert_eq!(fade_opacity(800, 800, 0.25), 0.0);
        assert_eq!(fade_opacity(5000, 800, 0.25), 0.0);
    }

    #[test]
    fn test_zero_span_drops_to_zero() {
        assert_eq!(fade_opacity(100, 400, 1.0), 1.0);
        assert_eq!(fade_opacity(401, 400, 1.0), 0.0);
        assert_eq!(fade_opacity(1, 0, 0.25), 0.0);
    }

    #[test]
    fn test_non_finite_ratio_uses_default() {
        for ratio in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(fade_opacity(200, 800, ratio), 1.0);
            assert_eq!(fade_opacity(500, 800, ratio), 0.5);
            assert_eq!(fade_opacity(900, 800, ratio), 0.0);
        }
    }

    #[test]
    fn test_nan_ratio_keeps_consumer_opacity_in_range() {
        let harness = Harness::new();
        let fade = Fade::new("hero-fade", f64::NAN);
        let _disposer = fade.attach(&harness.coordinator).unwrap();

        harness.scroll_to(450.0);
        harness.frame_after(16);
        assert_eq!(fade.opacity(), 0.5);
    }

    #[test]
    fn test_fade_follows_scroll() {
        let harness = Harness::new();
        let fade = Fade::new("hero-fade", DEFAULT_FADE_START_RATIO);
        let _disposer = fade.attach(&harness.coordinator).unwrap();
        assert_eq!(fade.opacity(), 1.0);

        // 720px viewport: start at 180, span 540
        harness.scroll_to(450.0);
        harness.frame_after(16);
        assert_eq!(fade.opacity(), 0.5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_opacity_in_range_and_monotonic(
            y in 0u32..10_000,
            step in 1u32..500,
            height in 0u32..4000,
            ratio in 0.0f64..1.0
        ) {
            let a = fade_opacity(y, height, ratio);
            let b = fade_opacity(y + step, height, ratio);
            prop_assert!((0.0..=1.0).contains(&a));
            prop_assert!(b <= a);
        }
    }
}
