use std::ops::RangeInclusive;

use drift_engine::coords::{Vec2, Viewport};

/// Range of the random bubble size, in unit space.
pub const SIZE_RANGE: RangeInclusive<f32> = 0.15..=0.75;
/// Range of the random factor applied to the aspect ratio when stretching the
/// vertical extent.
pub const RATIO_JITTER: RangeInclusive<f32> = 0.25..=1.75;
/// Range of the random bubble opacity.
pub const OPACITY_RANGE: RangeInclusive<f32> = 0.5..=1.0;

/// Width over height of `frame`, never below 1.
///
/// Zero, negative, infinite and NaN ratios all collapse to 1.
pub fn safe_aspect(frame: Viewport) -> f32 {
    let ratio = frame.width / frame.height;
    if !ratio.is_finite() || ratio <= 0.0 {
        return 1.0;
    }
    ratio.max(1.0)
}

#[inline]
fn uniform(rng: &mut fastrand::Rng, range: &RangeInclusive<f32>) -> f32 {
    let (lo, hi) = (*range.start(), *range.end());
    (lo + rng.f32() * (hi - lo)).clamp(lo, hi)
}

/// A fresh gradient focus anywhere in `[0, 1]²`.
pub fn sample_position(rng: &mut fastrand::Rng) -> Vec2 {
    Vec2::new(rng.f32(), rng.f32())
}

/// One draw of the extent sampler, kept whole so tests can check each factor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExtentSample {
    pub size: f32,
    pub jitter: f32,
    pub aspect: f32,
}

impl ExtentSample {
    pub fn draw(rng: &mut fastrand::Rng, frame: Viewport) -> Self {
        Self {
            size: uniform(rng, &SIZE_RANGE),
            jitter: uniform(rng, &RATIO_JITTER),
            aspect: safe_aspect(frame),
        }
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        self.aspect * self.jitter
    }

    /// Offset from the focus to the outer edge point.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.size, self.size * self.ratio())
    }
}

/// Offset from focus to edge for a bubble living in `frame`.
pub fn sample_extent(rng: &mut fastrand::Rng, frame: Viewport) -> Vec2 {
    ExtentSample::draw(rng, frame).offset()
}

pub fn sample_opacity(rng: &mut fastrand::Rng) -> f32 {
    uniform(rng, &OPACITY_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height_when_wide() {
        assert_eq!(safe_aspect(Viewport::new(300.0, 200.0)), 1.5);
    }

    #[test]
    fn aspect_never_below_one() {
        assert_eq!(safe_aspect(Viewport::new(200.0, 300.0)), 1.0);
    }

    #[test]
    fn degenerate_aspect_is_one() {
        assert_eq!(safe_aspect(Viewport::new(0.0, 0.0)), 1.0);
        assert_eq!(safe_aspect(Viewport::new(100.0, 0.0)), 1.0);
        assert_eq!(safe_aspect(Viewport::new(0.0, 100.0)), 1.0);
        assert_eq!(safe_aspect(Viewport::new(-50.0, 100.0)), 1.0);
        assert_eq!(safe_aspect(Viewport::new(f32::NAN, 100.0)), 1.0);
    }

    #[test]
    fn extent_uses_frame_aspect() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..256 {
            let s = ExtentSample::draw(&mut rng, Viewport::new(300.0, 200.0));
            assert_eq!(s.aspect, 1.5);
            assert!(SIZE_RANGE.contains(&s.size));
            assert!(RATIO_JITTER.contains(&s.jitter));
            let off = s.offset();
            assert_eq!(off.x, s.size);
            assert!((off.y - s.size * 1.5 * s.jitter).abs() < 1e-6);
        }
    }

    #[test]
    fn consecutive_positions_differ() {
        let mut rng = fastrand::Rng::with_seed(1);
        let a = sample_position(&mut rng);
        let b = sample_position(&mut rng);
        assert_ne!(a, b);
    }
}
