use drift_engine::coords::{Rect, Vec2, Viewport};
use drift_engine::core::{App, AppControl, FrameCtx};
use drift_engine::input::{HostEvent, Key, Lifecycle};
use drift_engine::raster::Canvas;
use drift_engine::render::ImageRenderer;
use drift_ui::{GradientView, ToggleMode};

use crate::palette;

/// Horizontal margin between the window edge and the card.
const CARD_MARGIN: f32 = 40.0;
const CARD_TOP: f32 = 40.0;
const CARD_HEIGHT: f32 = 200.0;

/// Factor applied per arrow-key press, and the speeds it may reach.
const SPEED_STEP: f32 = 1.25;
const SPEED_RANGE: (f32, f32) = (0.25, 4.0);

/// Where the card sits in a window of logical size `window`.
pub fn card_rect(window: Viewport) -> Rect {
    let width = (window.width - 2.0 * CARD_MARGIN).max(0.0);
    let height = CARD_HEIGHT.min((window.height - CARD_TOP).max(0.0));
    Rect::new(CARD_MARGIN, CARD_TOP, width, height)
}

/// Windowed host: one gradient card on a plain backdrop.
pub struct CardApp {
    view: GradientView,
    tap: ToggleMode,
    card: Rect,
    canvas: Canvas,
    renderer: ImageRenderer,
}

impl CardApp {
    /// `window` is the initial logical window size; the card is laid out
    /// right away so the view has bounds before it appears.
    pub fn new(view: GradientView, tap: ToggleMode, window: Viewport) -> Self {
        let mut app = Self {
            view,
            tap,
            card: Rect::default(),
            canvas: Canvas::new(0, 0),
            renderer: ImageRenderer::new(),
        };
        app.relayout(window);
        app
    }

    fn relayout(&mut self, window: Viewport) {
        self.card = card_rect(window);
        self.view.layout(self.card.size.x, self.card.size.y);
    }

    /// Scales the animation speed by `factor`; running steps keep their pace.
    fn change_speed(&mut self, factor: f32) {
        let motion = *self.view.motion();
        let speed = (motion.speed * factor).clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        log::info!("animation speed {speed:.2}x");
        self.view.set_motion(motion.with_speed(speed));
    }

    fn lifecycle(&mut self, signal: Lifecycle, now: f64) {
        match signal {
            Lifecycle::Appeared => self.view.view_did_appear(now),
            Lifecycle::Disappearing => self.view.view_will_disappear(),
            Lifecycle::WillSuspend => self.view.notify_will_suspend(now),
            Lifecycle::DidResume => self.view.notify_did_resume(now),
        }
    }
}

impl App for CardApp {
    fn on_event(&mut self, event: HostEvent, now: f64) -> AppControl {
        match event {
            HostEvent::Lifecycle(signal) => self.lifecycle(signal, now),
            HostEvent::Resized { width, height } => self.relayout(Viewport::new(width, height)),
            HostEvent::Click { x, y } => {
                if self.card.contains(Vec2::new(x, y)) {
                    self.view.toggle(now, self.tap);
                }
            }
            HostEvent::KeyPressed(Key::Space | Key::Enter) => self.view.toggle(now, self.tap),
            HostEvent::KeyPressed(Key::S) => self.view.toggle(now, ToggleMode::StartStop),
            HostEvent::KeyPressed(Key::P) => self.view.toggle(now, ToggleMode::PauseResume),
            HostEvent::KeyPressed(Key::Up) => self.change_speed(SPEED_STEP),
            HostEvent::KeyPressed(Key::Down) => self.change_speed(1.0 / SPEED_STEP),
            HostEvent::KeyPressed(Key::Escape) => return AppControl::Exit,
            HostEvent::KeyPressed(Key::Other) => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let now = ctx.time.elapsed;
        self.relayout(ctx.viewport());
        self.view.tick(now);

        let scale = ctx.window.scale_factor() as f32;
        let w = (self.card.size.x * scale).round().max(0.0) as u32;
        let h = (self.card.size.y * scale).round().max(0.0) as u32;
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.resize(w, h);
        }
        if let Err(e) = self.view.compose(now, &mut self.canvas) {
            log::error!("compose failed: {e:#}");
            return AppControl::Exit;
        }

        let card = self.card;
        let canvas = &self.canvas;
        let renderer = &mut self.renderer;
        ctx.render(palette::backdrop(), |rctx, target| {
            renderer.render(rctx, target, canvas, card);
        })
    }

    fn wants_continuous_redraw(&self) -> bool {
        self.view.is_animating()
    }
}
