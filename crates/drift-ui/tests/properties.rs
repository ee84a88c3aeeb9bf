//! Property tests for bubble sampling, the bubble state machine and view
//! reconciliation.

use drift_engine::coords::Viewport;
use drift_engine::paint::Color;
use drift_ui::geometry::{
    safe_aspect, sample_opacity, sample_position, ExtentSample, OPACITY_RANGE, RATIO_JITTER,
    SIZE_RANGE,
};
use drift_ui::prelude::*;
use proptest::prelude::*;

fn color(i: usize) -> Color {
    Color::from_srgb_u8((i * 37 % 256) as u8, 80, 160, 255)
}

fn palette(n: usize) -> Vec<Color> {
    (0..n).map(color).collect()
}

fn seeded_view(seed: u64) -> GradientView {
    let mut v = GradientView::with_seed(ViewConfig::default(), MotionConfig::default(), seed);
    v.layout(300.0, 200.0);
    v
}

#[derive(Debug, Copy, Clone)]
enum Verb {
    Start,
    Stop,
    Pause,
    Resume,
    WillSuspend,
    DidResume,
    Toggle(ToggleMode),
    Tick,
}

fn arb_verb() -> impl Strategy<Value = Verb> {
    prop_oneof![
        Just(Verb::Start),
        Just(Verb::Stop),
        Just(Verb::Pause),
        Just(Verb::Resume),
        Just(Verb::WillSuspend),
        Just(Verb::DidResume),
        Just(Verb::Toggle(ToggleMode::StartStop)),
        Just(Verb::Toggle(ToggleMode::PauseResume)),
        Just(Verb::Tick),
    ]
}

fn expected_bubble_state(state: AnimationState) -> BubbleState {
    match state {
        AnimationState::Stopped => BubbleState::Idle,
        AnimationState::Running => BubbleState::Running,
        AnimationState::Paused => BubbleState::Paused,
    }
}

proptest! {
    #[test]
    fn positions_stay_in_unit_square(seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        for _ in 0..32 {
            let p = sample_position(&mut rng);
            prop_assert!((0.0..=1.0).contains(&p.x));
            prop_assert!((0.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn extents_stay_in_range(seed in any::<u64>(), w in 0.0f32..4000.0, h in 0.0f32..4000.0) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let frame = Viewport::new(w, h);
        let s = ExtentSample::draw(&mut rng, frame);
        prop_assert!(SIZE_RANGE.contains(&s.size));
        prop_assert!(RATIO_JITTER.contains(&s.jitter));
        prop_assert!(s.aspect >= 1.0);
        prop_assert!(s.offset().is_finite());
    }

    #[test]
    fn opacities_stay_in_range(seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        for _ in 0..32 {
            prop_assert!(OPACITY_RANGE.contains(&sample_opacity(&mut rng)));
        }
    }

    #[test]
    fn aspect_is_finite_and_at_least_one(w in any::<f32>(), h in any::<f32>()) {
        let a = safe_aspect(Viewport::new(w, h));
        prop_assert!(a.is_finite());
        prop_assert!(a >= 1.0);
    }

    #[test]
    fn pause_delays_completion_by_its_length(
        seed in any::<u64>(),
        pause_at in 0.0f64..1.6,
        delta in 0.01f64..30.0,
    ) {
        let mut b = BubbleLayer::new(color(0), Viewport::new(300.0, 200.0), MotionConfig::default(), fastrand::Rng::with_seed(seed));
        b.start(0.0);
        b.pause(pause_at);
        b.resume(pause_at + delta);
        let due = 1.7 + delta;
        prop_assert_eq!(b.tick(due - 1e-6), 0);
        prop_assert_eq!(b.tick(due + 1e-6), 1);
    }

    #[test]
    fn rearmed_steps_pick_new_targets(seed in any::<u64>(), steps in 1usize..20) {
        let mut b = BubbleLayer::new(color(1), Viewport::new(300.0, 200.0), MotionConfig::default(), fastrand::Rng::with_seed(seed));
        b.start(0.0);
        let mut previous = b.model();
        for i in 1..=steps {
            prop_assert_eq!(b.tick(1.7 * i as f64 + 1e-6), 1);
            let next = b.model();
            prop_assert_ne!(next.position, previous.position);
            previous = next;
        }
    }

    #[test]
    fn children_follow_view_state(seed in any::<u64>(), verbs in proptest::collection::vec(arb_verb(), 0..40)) {
        let mut v = seeded_view(seed);
        v.reconcile(Group::Base, &palette(3), 0.0);
        v.reconcile(Group::Highlight, &palette(2), 0.0);

        let mut now = 0.0;
        for verb in verbs {
            now += 0.37;
            match verb {
                Verb::Start => v.start(now),
                Verb::Stop => v.stop(),
                Verb::Pause => v.pause(now),
                Verb::Resume => v.resume(now),
                Verb::WillSuspend => v.notify_will_suspend(now),
                Verb::DidResume => v.notify_did_resume(now),
                Verb::Toggle(mode) => v.toggle(now, mode),
                Verb::Tick => { v.tick(now); }
            }
            let want = expected_bubble_state(v.state());
            for group in Group::ALL {
                for b in v.bubbles(group) {
                    prop_assert_eq!(b.state(), want);
                }
            }
            prop_assert_eq!(v.is_animating(), v.state() == AnimationState::Running);
            if v.is_auto_suspended() {
                prop_assert_eq!(v.state(), AnimationState::Paused);
            }
        }
    }

    #[test]
    fn reconcile_keeps_the_shared_prefix(seed in any::<u64>(), from in 0usize..8, to in 0usize..8, running in any::<bool>()) {
        let mut v = seeded_view(seed);
        v.reconcile(Group::Base, &palette(from), 0.0);
        if running {
            v.start(0.0);
        }
        let before: Vec<_> = v.bubbles(Group::Base).iter().map(|b| (b.model(), b.state())).collect();

        v.reconcile(Group::Base, &palette(to), 0.5);
        let after: Vec<_> = v.bubbles(Group::Base).iter().map(|b| (b.model(), b.state())).collect();

        prop_assert_eq!(after.len(), to);
        let shared = from.min(to);
        prop_assert_eq!(&after[..shared], &before[..shared]);
        let want = if running { BubbleState::Running } else { BubbleState::Idle };
        for (_, state) in &after[shared..] {
            prop_assert_eq!(*state, want);
        }
    }
}
