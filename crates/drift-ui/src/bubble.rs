use drift_engine::anim::Transition;
use drift_engine::coords::{Vec2, Viewport};
use drift_engine::paint::{Color, ColorStop, RadialGradient};
use drift_engine::time::LayerClock;

use crate::geometry::{sample_extent, sample_opacity, sample_position};
use crate::motion::MotionConfig;

/// Stop positions of a bubble's gradient: full color, half alpha, clear.
pub const STOP_POSITIONS: [f32; 3] = [0.0, 0.8, 1.0];

/// Cap on steps completed in one `tick`. A host that was away for longer than
/// this many steps restarts the chain from the current time.
const MAX_CATCH_UP: usize = 1024;

/// Run state of a single bubble.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BubbleState {
    Idle,
    Running,
    Paused,
}

/// Geometry of a bubble in unit space of its frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BubbleGeometry {
    /// Inner focus of the gradient.
    pub position: Vec2,
    /// Outer edge point of the gradient (`position` plus the extent offset).
    pub edge: Vec2,
    pub opacity: f32,
}

impl BubbleGeometry {
    #[inline]
    pub fn extent_offset(&self) -> Vec2 {
        self.edge - self.position
    }
}

// ── Motion ────────────────────────────────────────────────────────────────

/// One in-flight step: three transitions sharing begin, duration and easing.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Motion {
    position: Transition<Vec2>,
    edge: Transition<Vec2>,
    opacity: Transition<f32>,
}

impl Motion {
    fn new(from: BubbleGeometry, to: BubbleGeometry, begin: f64, config: &MotionConfig) -> Self {
        let duration = config.step();
        let easing = config.easing();
        Self {
            position: Transition::new(from.position, to.position, begin, duration, easing),
            edge: Transition::new(from.edge, to.edge, begin, duration, easing),
            opacity: Transition::new(from.opacity, to.opacity, begin, duration, easing),
        }
    }

    #[inline]
    fn end(&self) -> f64 {
        self.position.end()
    }

    #[inline]
    fn is_finished(&self, t: f64) -> bool {
        self.position.is_finished(t)
    }

    fn sample(&self, t: f64) -> BubbleGeometry {
        BubbleGeometry {
            position: self.position.value_at(t),
            edge: self.edge.value_at(t),
            opacity: self.opacity.value_at(t),
        }
    }
}

// ── BubbleLayer ───────────────────────────────────────────────────────────

/// A radial-gradient blob that keeps wandering to random targets.
///
/// Every step samples a new position, extent and opacity, commits them as the
/// model and starts an eased transition toward them from what is currently on
/// screen. When a step completes under a running clock the next one begins at
/// exactly its end time, so the chain has neither gaps nor overlaps.
///
/// All times are host seconds. The layer never reads a clock itself; the
/// owner passes `now` into every time-dependent call and drives completions
/// with [`tick`](Self::tick).
#[derive(Debug)]
pub struct BubbleLayer {
    color: Color,
    stops: [ColorStop; 3],
    frame: Viewport,
    model: BubbleGeometry,
    motion: Option<Motion>,
    state: BubbleState,
    clock: LayerClock,
    config: MotionConfig,
    rng: fastrand::Rng,
    completed: u64,
}

impl BubbleLayer {
    /// Creates an idle bubble at a random spot.
    pub fn new(color: Color, frame: Viewport, config: MotionConfig, mut rng: fastrand::Rng) -> Self {
        let position = sample_position(&mut rng);
        let edge = position + sample_extent(&mut rng, frame);
        Self {
            color,
            stops: stops_for(color),
            frame,
            model: BubbleGeometry { position, edge, opacity: 1.0 },
            motion: None,
            state: BubbleState::Idle,
            clock: LayerClock::new(),
            config,
            rng,
            completed: 0,
        }
    }

    // ── control ──

    /// Idle → Running. Returns whether the call changed state.
    pub fn start(&mut self, now: f64) -> bool {
        if self.state != BubbleState::Idle {
            log::trace!("bubble start ignored in {:?}", self.state);
            return false;
        }
        self.clock.reset();
        self.state = BubbleState::Running;
        let t = self.clock.local(now);
        self.begin_step(t);
        true
    }

    /// Running/Paused → Idle. The in-flight step is dropped and the display
    /// snaps to the committed model.
    pub fn stop(&mut self) -> bool {
        if self.state == BubbleState::Idle {
            log::trace!("bubble stop ignored while idle");
            return false;
        }
        self.motion = None;
        self.clock.reset();
        self.state = BubbleState::Idle;
        true
    }

    /// Running → Paused. The step freezes where it is.
    pub fn pause(&mut self, now: f64) -> bool {
        if self.state != BubbleState::Running {
            log::trace!("bubble pause ignored in {:?}", self.state);
            return false;
        }
        self.clock.freeze(now);
        self.state = BubbleState::Paused;
        true
    }

    /// Paused → Running. The remaining part of the step plays out as if the
    /// pause never happened.
    pub fn resume(&mut self, now: f64) -> bool {
        if self.state != BubbleState::Paused {
            log::trace!("bubble resume ignored in {:?}", self.state);
            return false;
        }
        self.clock.thaw(now);
        self.state = BubbleState::Running;
        true
    }

    /// Completes every step that ended by `now` and re-arms the next one.
    /// Returns the number of completed steps.
    pub fn tick(&mut self, now: f64) -> usize {
        if self.state != BubbleState::Running {
            return 0;
        }
        let t = self.clock.local(now);
        let mut completed = 0;
        while let Some(motion) = self.motion {
            if !motion.is_finished(t) {
                break;
            }
            completed += 1;
            self.completed += 1;
            if completed >= MAX_CATCH_UP {
                log::debug!("bubble fell {completed} steps behind; restarting at {t:.3}");
                self.begin_step(t);
                break;
            }
            self.begin_step(motion.end());
        }
        completed
    }

    fn begin_step(&mut self, at: f64) {
        let from = match &self.motion {
            Some(m) => m.sample(at),
            None => self.model,
        };
        let position = sample_position(&mut self.rng);
        let target = BubbleGeometry {
            position,
            edge: position + sample_extent(&mut self.rng, self.frame),
            opacity: sample_opacity(&mut self.rng),
        };
        self.model = target;
        self.motion = Some(Motion::new(from, target, at, &self.config));
    }

    // ── appearance ──

    /// Replaces the color stops. Motion is untouched.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.stops = stops_for(color);
    }

    /// New bounds for extent sampling; applies from the next step.
    pub fn set_frame(&mut self, frame: Viewport) {
        self.frame = frame;
    }

    /// New motion settings; applies from the next step.
    pub fn set_motion(&mut self, config: MotionConfig) {
        self.config = config;
    }

    // ── queries ──

    #[inline]
    pub fn state(&self) -> BubbleState {
        self.state
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state == BubbleState::Running
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn color_stops(&self) -> &[ColorStop; 3] {
        &self.stops
    }

    #[inline]
    pub fn frame(&self) -> Viewport {
        self.frame
    }

    /// Committed target geometry.
    #[inline]
    pub fn model(&self) -> BubbleGeometry {
        self.model
    }

    /// Steps completed since creation.
    #[inline]
    pub fn completed_steps(&self) -> u64 {
        self.completed
    }

    /// Local end time of the in-flight step.
    pub fn step_end(&self) -> Option<f64> {
        self.motion.map(|m| m.end())
    }

    /// Geometry on screen at host time `now`.
    pub fn presentation(&self, now: f64) -> BubbleGeometry {
        match &self.motion {
            Some(m) => m.sample(self.clock.local(now)),
            None => self.model,
        }
    }

    /// Presentation resolved into pixel space of `frame`.
    pub fn gradient(&self, now: f64, frame: Viewport) -> RadialGradient {
        let g = self.presentation(now);
        let size = frame.size();
        RadialGradient::new(g.position.scale(size), g.edge.scale(size), self.stops.to_vec())
    }
}

fn stops_for(color: Color) -> [ColorStop; 3] {
    [
        ColorStop::new(STOP_POSITIONS[0], color),
        ColorStop::new(STOP_POSITIONS[1], color.with_alpha(0.5)),
        ColorStop::new(STOP_POSITIONS[2], color.with_alpha(0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{OPACITY_RANGE, SIZE_RANGE};

    fn bubble(seed: u64) -> BubbleLayer {
        BubbleLayer::new(
            Color::from_srgb_u8(200, 40, 90, 255),
            Viewport::new(300.0, 200.0),
            MotionConfig::default(),
            fastrand::Rng::with_seed(seed),
        )
    }

    #[test]
    fn new_bubble_is_idle_with_random_geometry() {
        let a = bubble(1);
        let b = bubble(2);
        assert_eq!(a.state(), BubbleState::Idle);
        assert_ne!(a.model().position, b.model().position);
        assert_eq!(a.model().opacity, 1.0);
        assert_eq!(a.presentation(5.0), a.model());
    }

    #[test]
    fn invalid_verbs_are_noops() {
        let mut b = bubble(3);
        assert!(!b.pause(0.0));
        assert!(!b.resume(0.0));
        assert!(!b.stop());
        assert_eq!(b.state(), BubbleState::Idle);

        assert!(b.start(0.0));
        assert!(!b.start(0.1));
        assert!(!b.resume(0.1));
        assert_eq!(b.state(), BubbleState::Running);

        assert!(b.pause(0.2));
        assert!(!b.pause(0.3));
        assert_eq!(b.state(), BubbleState::Paused);
    }

    #[test]
    fn start_commits_target_and_animates_from_display() {
        let mut b = bubble(4);
        let before = b.model();
        b.start(10.0);
        let target = b.model();
        assert_ne!(before, target);
        assert_eq!(b.presentation(10.0), before);
        assert_eq!(b.presentation(12.0), target);
        assert!(SIZE_RANGE.contains(&target.extent_offset().x));
        assert!(OPACITY_RANGE.contains(&target.opacity));
    }

    #[test]
    fn completion_rearms_at_previous_end() {
        let mut b = bubble(5);
        b.start(0.0);
        let first = b.model();
        assert_eq!(b.tick(1.69), 0);
        assert_eq!(b.tick(1.7), 1);
        let second = b.model();
        assert_ne!(first, second);
        assert_eq!(b.step_end(), Some(3.4));
        assert_eq!(b.presentation(1.7), first);
    }

    #[test]
    fn long_gap_completes_every_step() {
        let mut b = bubble(6);
        b.start(0.0);
        assert_eq!(b.tick(1.7 * 3.0 + 0.01), 3);
        assert_eq!(b.completed_steps(), 3);
    }

    #[test]
    fn pause_shifts_completion_by_pause_length() {
        let mut b = bubble(7);
        b.start(0.0);
        b.pause(0.5);
        let frozen = b.presentation(0.5);
        assert_eq!(b.presentation(1.2), frozen);
        assert_eq!(b.tick(1.2), 0);

        b.resume(1.5);
        assert_eq!(b.presentation(1.5), frozen);
        assert_eq!(b.tick(2.69), 0);
        assert_eq!(b.tick(2.7), 1);
    }

    #[test]
    fn stop_snaps_to_model_and_drops_pending_step() {
        let mut b = bubble(8);
        b.start(0.0);
        let target = b.model();
        assert!(b.stop());
        assert_eq!(b.presentation(0.3), target);
        assert_eq!(b.step_end(), None);
        assert_eq!(b.tick(100.0), 0);
        assert_eq!(b.completed_steps(), 0);
    }

    #[test]
    fn stop_from_paused_then_restart_is_fresh() {
        let mut b = bubble(9);
        b.start(0.0);
        b.pause(1.0);
        assert!(b.stop());
        let settled = b.model();
        assert!(b.start(20.0));
        assert_ne!(b.model(), settled);
        assert_eq!(b.presentation(20.0), settled);
        let end = b.step_end().unwrap_or_default();
        assert!((end - 21.7).abs() < 1e-9);
    }

    #[test]
    fn speed_change_applies_from_next_step() {
        let mut b = bubble(12);
        b.start(0.0);
        b.set_motion(MotionConfig::default().with_speed(2.0));
        assert_eq!(b.step_end(), Some(1.7));
        assert_eq!(b.tick(1.7), 1);
        let end = b.step_end().unwrap_or_default();
        assert!((end - 2.55).abs() < 1e-9);
    }

    #[test]
    fn recolor_keeps_motion() {
        let mut b = bubble(10);
        b.start(0.0);
        let mid = b.presentation(0.8);
        b.set_color(Color::from_srgb_u8(10, 200, 30, 255));
        assert_eq!(b.presentation(0.8), mid);
        let stops = b.color_stops();
        assert_eq!(stops[1].color.a, 0.5);
        assert_eq!(stops[2].color.a, 0.0);
        assert_eq!(stops[0].t, 0.0);
        assert_eq!(stops[2].t, 1.0);
    }

    #[test]
    fn gradient_is_in_pixel_space() {
        let b = bubble(11);
        let g = b.gradient(0.0, Viewport::new(300.0, 200.0));
        let m = b.model();
        assert_eq!(g.center, Vec2::new(m.position.x * 300.0, m.position.y * 200.0));
        assert_eq!(g.edge, Vec2::new(m.edge.x * 300.0, m.edge.y * 200.0));
        assert_eq!(g.stops.len(), 3);
    }
}
