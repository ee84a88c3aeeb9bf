use anyhow::Result;

use drift_engine::coords::Viewport;
use drift_engine::raster::{BlendMode, Canvas};

use crate::view::{GradientView, Group};

impl GradientView {
    /// Renders the view at host time `now` into `canvas`.
    ///
    /// The canvas covers the view's frame; its pixel size may differ from the
    /// logical frame (HiDPI), in which case blur and corner radii are scaled.
    /// Order: background, base group (source-over), highlight group as one
    /// overlay-blended layer, backdrop blur, rounded mask.
    pub fn compose(&self, now: f64, canvas: &mut Canvas) -> Result<()> {
        let (w, h) = (canvas.width(), canvas.height());
        if w == 0 || h == 0 {
            return Ok(());
        }
        let pixels = Viewport::new(w as f32, h as f32);
        let scale = self.pixel_scale(pixels);
        let config = self.config();

        canvas.clear(config.background);
        for bubble in self.bubbles(Group::Base) {
            let g = bubble.gradient(now, pixels);
            canvas.fill_radial(&g, bubble.presentation(now).opacity);
        }

        let highlight = self.bubbles(Group::Highlight);
        if !highlight.is_empty() {
            let mut layer = Canvas::new(w, h);
            for bubble in highlight {
                let g = bubble.gradient(now, pixels);
                layer.fill_radial(&g, bubble.presentation(now).opacity);
            }
            canvas.composite(&layer, BlendMode::Overlay)?;
        }

        let blur = (config.blur_radius * scale).round();
        if blur >= 1.0 {
            canvas.blur(blur as u32);
        }
        canvas.mask_rounded(config.corner_radius * scale);
        Ok(())
    }

    /// Device pixels per logical pixel for a canvas of size `pixels`.
    fn pixel_scale(&self, pixels: Viewport) -> f32 {
        let frame = self.frame();
        if !frame.is_valid() {
            return 1.0;
        }
        let s = pixels.width / frame.width;
        if s.is_finite() && s > 0.0 { s } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use drift_engine::paint::Color;

    use super::*;
    use crate::motion::MotionConfig;
    use crate::view::ViewConfig;

    fn flat(background: Color) -> ViewConfig {
        ViewConfig { corner_radius: 0.0, blur_radius: 0.0, background }
    }

    #[test]
    fn empty_view_is_background() {
        let bg = Color::from_srgb_u8(10, 20, 30, 255);
        let mut v = GradientView::with_seed(flat(bg), MotionConfig::default(), 1);
        v.layout(16.0, 8.0);
        let mut c = Canvas::new(16, 8);
        v.compose(0.0, &mut c).unwrap();
        assert!(c.pixels().iter().all(|p| *p == bg));
    }

    #[test]
    fn blur_of_flat_view_changes_nothing() {
        let bg = Color::from_srgb_u8(90, 90, 90, 255);
        let config = ViewConfig { blur_radius: 4.0, ..flat(bg) };
        let mut v = GradientView::with_seed(config, MotionConfig::default(), 1);
        v.layout(12.0, 12.0);
        let mut c = Canvas::new(12, 12);
        v.compose(0.0, &mut c).unwrap();
        for p in c.pixels() {
            assert!((p.r - bg.r).abs() < 1e-4);
            assert!((p.a - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn bubbles_paint_over_background() {
        let mut v = GradientView::with_seed(flat(Color::transparent()), MotionConfig::default(), 3);
        v.layout(64.0, 64.0);
        v.reconcile(Group::Base, &[Color::from_srgb_u8(255, 0, 0, 255)], 0.0);
        let mut c = Canvas::new(64, 64);
        v.compose(0.0, &mut c).unwrap();
        assert!(c.pixels().iter().any(|p| p.a > 0.0));
    }

    #[test]
    fn rounded_corners_are_cut() {
        let config = ViewConfig { corner_radius: 6.0, ..flat(Color::from_srgb_u8(255, 255, 255, 255)) };
        let mut v = GradientView::with_seed(config, MotionConfig::default(), 1);
        v.layout(20.0, 20.0);
        let mut c = Canvas::new(20, 20);
        v.compose(0.0, &mut c).unwrap();
        assert_eq!(c.pixel(0, 0).map(|p| p.a), Some(0.0));
        assert_eq!(c.pixel(10, 10).map(|p| p.a), Some(1.0));
    }

    #[test]
    fn zero_sized_canvas_is_fine() {
        let v = GradientView::with_seed(ViewConfig::default(), MotionConfig::default(), 1);
        let mut c = Canvas::new(0, 0);
        assert!(v.compose(0.0, &mut c).is_ok());
    }
}
