//! Easing curves as pure functions of normalized progress.

/// Cubic Bezier timing curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
///
/// `x1` and `x2` are clamped to `[0, 1]` so the curve is a function of time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1: x1.clamp(0.0, 1.0), y1, x2: x2.clamp(0.0, 1.0), y2 }
    }

    /// Slow start, slow finish; the curve the bubbles use when not springing.
    pub fn drift() -> Self {
        Self::new(0.23, 0.01, 0.77, 0.99)
    }

    #[inline]
    fn coeffs(p1: f32, p2: f32) -> (f32, f32, f32) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }

    #[inline]
    fn sample(p1: f32, p2: f32, s: f32) -> f32 {
        let (a, b, c) = Self::coeffs(p1, p2);
        ((a * s + b) * s + c) * s
    }

    #[inline]
    fn slope_x(&self, s: f32) -> f32 {
        let (a, b, c) = Self::coeffs(self.x1, self.x2);
        (3.0 * a * s + 2.0 * b) * s + c
    }

    /// Curve parameter `s` such that `x(s) == x`.
    fn solve_s(&self, x: f32) -> f32 {
        const EPS: f32 = 1e-6;

        let mut s = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < EPS {
                return s;
            }
            let d = self.slope_x(s);
            if d.abs() < EPS {
                break;
            }
            s -= err / d;
        }

        // Newton stalled on a flat segment; bisect.
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        while hi - lo > EPS {
            let v = Self::sample(self.x1, self.x2, s);
            if (v - x).abs() < EPS {
                break;
            }
            if v < x { lo = s } else { hi = s }
            s = 0.5 * (lo + hi);
        }
        s
    }

    pub fn ease(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_s(x))
    }
}

/// Damped harmonic oscillator released from rest one unit away from its target.
///
/// `value(t)` is the fraction of the distance covered after `t` seconds; it may
/// overshoot 1 when underdamped.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spring {
    pub mass: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub initial_velocity: f32,
}

impl Spring {
    pub const fn new(mass: f32, stiffness: f32, damping: f32) -> Self {
        Self { mass, stiffness, damping, initial_velocity: 0.0 }
    }

    /// Heavy, well-damped spring used for bubble drift.
    pub const fn drift() -> Self {
        Self::new(10.0, 100.0, 50.0)
    }

    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    pub fn value(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        let m = self.mass.max(f32::EPSILON);
        let w0 = (self.stiffness.max(0.0) / m).sqrt();
        if w0 <= f32::EPSILON {
            return 0.0;
        }
        let zeta = self.damping_ratio();
        let v0 = self.initial_velocity;

        // Remaining displacement x(t) with x(0) = 1, x'(0) = -v0.
        let x = if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let a = zeta * w0;
            (-a * t).exp() * ((wd * t).cos() + ((a - v0) / wd) * (wd * t).sin())
        } else if zeta == 1.0 {
            (-w0 * t).exp() * (1.0 + (w0 - v0) * t)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c2 = (-v0 - r1) / (r2 - r1);
            let c1 = 1.0 - c2;
            c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        };
        1.0 - x
    }
}

/// Timing curve of a transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Easing {
    Linear,
    Bezier(CubicBezier),
    /// Spring evaluated in seconds; a transition ends at its duration even if
    /// the spring has not fully settled, landing exactly on the target.
    Spring(Spring),
}

impl Easing {
    /// Eased fraction for linear `progress` in `[0, 1]` of a transition lasting
    /// `duration` seconds. Always 0 at the start and exactly 1 at the end.
    pub fn ease(&self, progress: f32, duration: f32) -> f32 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => progress,
            Easing::Bezier(b) => b.ease(progress),
            Easing::Spring(s) => s.value(progress * duration),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Spring(Spring::drift())
    }
}
