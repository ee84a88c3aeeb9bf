use drift_engine::anim::{CubicBezier, Easing, Spring};

/// Shortest step a bubble will take, in seconds.
const MIN_STEP: f64 = 1e-3;
/// Slowest speed multiplier accepted.
const MIN_SPEED: f32 = 0.01;

/// Timing curve family of a bubble step.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum MotionCurve {
    /// Damped spring; `speed` lightens the mass.
    #[default]
    Spring,
    /// Symmetric ease-in-out Bezier.
    Bezier,
}

/// Shared motion settings handed to every bubble of a view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionConfig {
    /// Nominal length of one step in seconds, before `speed` is applied.
    pub step_duration: f64,
    /// Speed multiplier. Larger is faster.
    pub speed: f32,
    pub curve: MotionCurve,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            step_duration: 1.7,
            speed: 1.0,
            curve: MotionCurve::Spring,
        }
    }
}

impl MotionConfig {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_curve(mut self, curve: MotionCurve) -> Self {
        self.curve = curve;
        self
    }

    #[inline]
    fn effective_speed(&self) -> f32 {
        if self.speed.is_finite() { self.speed.max(MIN_SPEED) } else { 1.0 }
    }

    /// Length of one step in seconds.
    pub fn step(&self) -> f64 {
        let d = self.step_duration / self.effective_speed() as f64;
        if d.is_finite() { d.max(MIN_STEP) } else { MIN_STEP }
    }

    pub fn easing(&self) -> Easing {
        match self.curve {
            MotionCurve::Spring => {
                let base = Spring::drift();
                Easing::Spring(Spring { mass: base.mass / self.effective_speed(), ..base })
            }
            MotionCurve::Bezier => Easing::Bezier(CubicBezier::drift()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_step_is_one_point_seven() {
        assert_eq!(MotionConfig::default().step(), 1.7);
    }

    #[test]
    fn speed_shortens_step_and_lightens_spring() {
        let cfg = MotionConfig::default().with_speed(2.0);
        assert_eq!(cfg.step(), 0.85);
        match cfg.easing() {
            Easing::Spring(s) => assert_eq!(s.mass, 5.0),
            other => panic!("expected spring, got {other:?}"),
        }
    }

    #[test]
    fn bad_speed_is_tamed() {
        assert_eq!(MotionConfig::default().with_speed(f32::NAN).step(), 1.7);
        let zero = MotionConfig::default().with_speed(0.0);
        assert!(zero.step().is_finite());
    }

    #[test]
    fn bezier_curve_is_selectable() {
        let cfg = MotionConfig::default().with_curve(MotionCurve::Bezier);
        assert_eq!(cfg.easing(), Easing::Bezier(CubicBezier::drift()));
    }
}
