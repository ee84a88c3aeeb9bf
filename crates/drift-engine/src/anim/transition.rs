use crate::coords::Vec2;

use super::Easing;

/// Values that can be interpolated by a [`Transition`].
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, to: f32, t: f32) -> f32 {
        self + (to - self) * t
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        Vec2::lerp(self, to, t)
    }
}

/// A timed interpolation from `from` to `to`.
///
/// Times are in the owner's local time base (seconds). The transition holds no
/// clock of its own: pausing is done by freezing the time that is passed in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition<T: Lerp> {
    pub from: T,
    pub to: T,
    pub begin: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl<T: Lerp> Transition<T> {
    pub fn new(from: T, to: T, begin: f64, duration: f64, easing: Easing) -> Self {
        Self { from, to, begin, duration: duration.max(0.0), easing }
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.begin + self.duration
    }

    #[inline]
    pub fn is_finished(&self, t: f64) -> bool {
        t >= self.end()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, t: f64) -> f32 {
        if self.duration <= 0.0 {
            return if t >= self.begin { 1.0 } else { 0.0 };
        }
        ((t - self.begin) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Interpolated value at local time `t`. Exactly `to` once finished.
    pub fn value_at(&self, t: f64) -> T {
        let p = self.progress(t);
        if p >= 1.0 {
            return self.to;
        }
        let k = self.easing.ease(p, self.duration as f32);
        self.from.lerp(self.to, k)
    }
}
