use drift_engine::coords::Viewport;
use drift_engine::paint::Color;

use crate::bubble::BubbleLayer;
use crate::motion::MotionConfig;

/// One of the two stacked bubble groups of a [`GradientView`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Group {
    /// Bottom group, drawn with source-over.
    Base,
    /// Top group, blended onto the base with overlay.
    Highlight,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Base, Group::Highlight];
}

/// Animation state of the whole view; authoritative over every bubble.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnimationState {
    Stopped,
    Running,
    Paused,
}

/// What a user tap does.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ToggleMode {
    /// Stopped ⇄ Running. A paused view is stopped.
    #[default]
    StartStop,
    /// Stopped → Running → Paused → Running.
    PauseResume,
}

/// Presentation settings of a view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewConfig {
    /// Corner radius of the card in logical pixels.
    pub corner_radius: f32,
    /// Backdrop blur radius in logical pixels.
    pub blur_radius: f32,
    /// Fill under the bubbles.
    pub background: Color,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            corner_radius: 15.0,
            blur_radius: 24.0,
            background: Color::from_straight(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Coordinator of two groups of [`BubbleLayer`]s.
///
/// The view owns every bubble, keeps their frames equal to its own, and fans
/// control verbs out to all of them. It also remembers whether a pause came
/// from the host going to the background so that only the matching foreground
/// signal resumes it.
#[derive(Debug)]
pub struct GradientView {
    base: Vec<BubbleLayer>,
    highlight: Vec<BubbleLayer>,
    state: AnimationState,
    auto_suspended: bool,
    frame: Viewport,
    config: ViewConfig,
    motion: MotionConfig,
    rng: fastrand::Rng,
}

impl GradientView {
    pub fn new(config: ViewConfig, motion: MotionConfig) -> Self {
        Self::with_rng(config, motion, fastrand::Rng::new())
    }

    /// Same as [`new`](Self::new) with reproducible bubble motion.
    pub fn with_seed(config: ViewConfig, motion: MotionConfig, seed: u64) -> Self {
        Self::with_rng(config, motion, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: ViewConfig, motion: MotionConfig, rng: fastrand::Rng) -> Self {
        Self {
            base: Vec::new(),
            highlight: Vec::new(),
            state: AnimationState::Stopped,
            auto_suspended: false,
            frame: Viewport::default(),
            config,
            motion,
            rng,
        }
    }

    // ── structure ──

    /// Makes `group` hold one bubble per entry of `colors`, index-aligned.
    ///
    /// Existing bubbles are recolored in place and keep their motion; extra
    /// ones are dropped from the end; missing ones are created and brought
    /// into the view's current state.
    pub fn reconcile(&mut self, group: Group, colors: &[Color], now: f64) {
        let state = self.state;
        let frame = self.frame;
        let motion = self.motion;

        let before = self.bubbles(group).len();
        let mut fresh = Vec::new();
        for _ in before..colors.len() {
            fresh.push(fastrand::Rng::with_seed(self.rng.u64(..)));
        }

        let bubbles = self.group_mut(group);
        bubbles.truncate(colors.len());
        for (bubble, &color) in bubbles.iter_mut().zip(colors) {
            bubble.set_color(color);
        }
        for (rng, &color) in fresh.into_iter().zip(&colors[before.min(colors.len())..]) {
            let mut bubble = BubbleLayer::new(color, frame, motion, rng);
            match state {
                AnimationState::Stopped => {}
                AnimationState::Running => {
                    bubble.start(now);
                }
                AnimationState::Paused => {
                    bubble.start(now);
                    bubble.pause(now);
                }
            }
            bubbles.push(bubble);
        }

        log::debug!("{group:?} group reconciled: {before} -> {} bubbles", colors.len());
    }

    /// New bounds for the view and every bubble.
    pub fn layout(&mut self, width: f32, height: f32) {
        let frame = Viewport::new(width, height);
        if frame == self.frame {
            return;
        }
        self.frame = frame;
        for bubble in self.base.iter_mut().chain(self.highlight.iter_mut()) {
            bubble.set_frame(frame);
        }
    }

    /// New motion settings for every bubble, effective from their next step.
    pub fn set_motion(&mut self, motion: MotionConfig) {
        self.motion = motion;
        for bubble in self.base.iter_mut().chain(self.highlight.iter_mut()) {
            bubble.set_motion(motion);
        }
    }

    // ── control ──

    pub fn start(&mut self, now: f64) {
        if self.state != AnimationState::Stopped {
            log::trace!("view start ignored in {:?}", self.state);
            return;
        }
        self.broadcast(|b| b.start(now));
        self.set_state(AnimationState::Running);
    }

    pub fn stop(&mut self) {
        self.auto_suspended = false;
        if self.state == AnimationState::Stopped {
            log::trace!("view stop ignored while stopped");
            return;
        }
        self.broadcast(|b| b.stop());
        self.set_state(AnimationState::Stopped);
    }

    pub fn pause(&mut self, now: f64) {
        self.auto_suspended = false;
        self.pause_inner(now);
    }

    pub fn resume(&mut self, now: f64) {
        if self.state != AnimationState::Paused {
            log::trace!("view resume ignored in {:?}", self.state);
            return;
        }
        self.auto_suspended = false;
        self.broadcast(|b| b.resume(now));
        self.set_state(AnimationState::Running);
    }

    fn pause_inner(&mut self, now: f64) -> bool {
        if self.state != AnimationState::Running {
            log::trace!("view pause ignored in {:?}", self.state);
            return false;
        }
        self.broadcast(|b| b.pause(now));
        self.set_state(AnimationState::Paused);
        true
    }

    fn broadcast(&mut self, mut verb: impl FnMut(&mut BubbleLayer) -> bool) {
        let mut skipped = 0;
        for bubble in self.base.iter_mut().chain(self.highlight.iter_mut()) {
            if !verb(bubble) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::trace!("{skipped} bubbles skipped a broadcast");
        }
    }

    fn set_state(&mut self, state: AnimationState) {
        log::debug!("gradient view {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    // ── lifecycle ──

    /// The host is going to the background.
    pub fn notify_will_suspend(&mut self, now: f64) {
        if self.pause_inner(now) {
            self.auto_suspended = true;
        }
    }

    /// The host is back in the foreground. Only undoes an automatic pause.
    pub fn notify_did_resume(&mut self, now: f64) {
        if !self.auto_suspended {
            log::trace!("view did-resume ignored: not auto-suspended");
            return;
        }
        self.resume(now);
    }

    pub fn view_did_appear(&mut self, now: f64) {
        self.start(now);
    }

    pub fn view_will_disappear(&mut self) {
        self.stop();
    }

    /// User tap.
    pub fn toggle(&mut self, now: f64, mode: ToggleMode) {
        match (mode, self.state) {
            (_, AnimationState::Stopped) => self.start(now),
            (ToggleMode::StartStop, _) => self.stop(),
            (ToggleMode::PauseResume, AnimationState::Running) => self.pause(now),
            (ToggleMode::PauseResume, AnimationState::Paused) => self.resume(now),
        }
    }

    /// Drives completions of every bubble. Returns the total of completed steps.
    pub fn tick(&mut self, now: f64) -> usize {
        self.base
            .iter_mut()
            .chain(self.highlight.iter_mut())
            .map(|b| b.tick(now))
            .sum()
    }

    // ── queries ──

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state == AnimationState::Running
    }

    #[inline]
    pub fn is_auto_suspended(&self) -> bool {
        self.auto_suspended
    }

    #[inline]
    pub fn frame(&self) -> Viewport {
        self.frame
    }

    #[inline]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[inline]
    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    pub fn bubbles(&self, group: Group) -> &[BubbleLayer] {
        match group {
            Group::Base => &self.base,
            Group::Highlight => &self.highlight,
        }
    }

    fn group_mut(&mut self, group: Group) -> &mut Vec<BubbleLayer> {
        match group {
            Group::Base => &mut self.base,
            Group::Highlight => &mut self.highlight,
        }
    }
}
