use std::fmt;

use anyhow::{ensure, Result};
use tiny_skia::{
    BlendMode, FillRule, GradientStop, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Point,
    PremultipliedColorU8, SpreadMode, Transform,
};

use crate::coords::{Rect, Vec2};
use crate::paint::{Color, RadialGradient};

use super::blur::box_blur;

/// Control-point distance for a quarter circle drawn with one cubic.
const KAPPA: f32 = 0.552_284_8;

/// CPU render target: a premultiplied RGBA8 pixmap, row-major, top-left origin.
///
/// Zero-sized canvases are allowed; every drawing call on them is a no-op.
pub struct Canvas {
    width: u32,
    height: u32,
    pixmap: Option<Pixmap>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas").field("width", &self.width).field("height", &self.height).finish()
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixmap: Pixmap::new(width, height) }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> Vec<Color> {
        self.pixmap
            .as_ref()
            .map(|p| p.pixels().iter().copied().map(from_skia).collect())
            .unwrap_or_default()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.as_ref()?.pixel(x, y).map(from_skia)
    }

    /// Changes the size; contents are cleared to transparent when it differs.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self, color: Color) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(to_skia(color));
        }
    }

    /// Draws `gradient` scaled by `opacity` with source-over.
    ///
    /// The ellipse is a unit circle shader stretched by the gradient radii.
    /// Invalid or degenerate gradients draw nothing.
    pub fn fill_radial(&mut self, gradient: &RadialGradient, opacity: f32) {
        if !gradient.is_valid() || opacity.is_nan() || opacity <= 0.0 {
            return;
        }
        let radii = gradient.radii();
        if radii.x <= f32::EPSILON || radii.y <= f32::EPSILON {
            return;
        }
        let area = if gradient.fades_out() {
            gradient.bounds()
        } else {
            Rect::from_origin_size(Vec2::zero(), Vec2::new(self.width as f32, self.height as f32))
        };
        let Some(area) = self.pixel_span(area) else {
            return;
        };
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        let stops = shader_stops(gradient, opacity.min(1.0));
        let stretch = Transform::from_row(radii.x, 0.0, 0.0, radii.y, gradient.center.x, gradient.center.y);
        let origin = Point::from_xy(0.0, 0.0);
        let Some(shader) = tiny_skia::RadialGradient::new(origin, origin, 1.0, stops, SpreadMode::Pad, stretch)
        else {
            return;
        };

        let mut paint = Paint::default();
        paint.shader = shader;
        paint.blend_mode = BlendMode::SourceOver;
        paint.anti_alias = false;
        pixmap.fill_rect(area, &paint, Transform::identity(), None);
    }

    /// Blends `layer` onto this canvas with `mode`. Sizes must match.
    pub fn composite(&mut self, layer: &Canvas, mode: BlendMode) -> Result<()> {
        ensure!(
            layer.width == self.width && layer.height == self.height,
            "layer is {}x{}, canvas is {}x{}",
            layer.width,
            layer.height,
            self.width,
            self.height
        );
        let (Some(pixmap), Some(source)) = (self.pixmap.as_mut(), layer.pixmap.as_ref()) else {
            return Ok(());
        };
        let paint = PixmapPaint { blend_mode: mode, ..PixmapPaint::default() };
        pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, Transform::identity(), None);
        Ok(())
    }

    /// Box-approximated gaussian blur with the given radius in pixels.
    pub fn blur(&mut self, radius: u32) {
        let (w, h) = (self.width as usize, self.height as usize);
        if let Some(pixmap) = self.pixmap.as_mut() {
            box_blur(pixmap.data_mut(), w, h, radius as usize);
        }
    }

    /// Clears everything outside a rounded rectangle covering the canvas.
    /// Corner edges are antialiased.
    pub fn mask_rounded(&mut self, radius: f32) {
        let (w, h) = (self.width as f32, self.height as f32);
        let r = radius.min(w * 0.5).min(h * 0.5);
        if r.is_nan() || r <= 0.0 {
            return;
        }
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), rounded_rect(w, h, r)) else {
            return;
        };
        let Some(mut mask) = Mask::new(self.width, self.height) else {
            return;
        };
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        pixmap.apply_mask(&mask);
    }

    /// Premultiplied RGBA8, the layout GPU upload expects.
    pub fn premultiplied_rgba8(&self) -> &[u8] {
        self.pixmap.as_ref().map_or(&[], |p| p.data())
    }

    /// Straight-alpha RGBA8, the layout image files expect.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let Some(pixmap) = self.pixmap.as_ref() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(pixmap.data().len());
        for p in pixmap.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Pixel rectangle covered by `area`, clipped to the canvas.
    fn pixel_span(&self, area: Rect) -> Option<tiny_skia::Rect> {
        if !area.origin.is_finite() || !area.size.is_finite() {
            return None;
        }
        let max = area.max();
        let x0 = area.origin.x.floor().max(0.0);
        let y0 = area.origin.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        tiny_skia::Rect::from_ltrb(x0, y0, x1, y1)
    }
}

fn rounded_rect(w: f32, h: f32, r: f32) -> Option<Path> {
    let k = r * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(w - r, 0.0);
    pb.cubic_to(w - r + k, 0.0, w, r - k, w, r);
    pb.line_to(w, h - r);
    pb.cubic_to(w, h - r + k, w - r + k, h, w - r, h);
    pb.line_to(r, h);
    pb.cubic_to(r - k, h, 0.0, h - r + k, 0.0, h - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

/// Stops for the tiny-skia shader, which interpolates straight colors.
///
/// Fully transparent stops take the hue of their nearest visible neighbour so
/// a fade to transparent does not pass through black.
fn shader_stops(gradient: &RadialGradient, opacity: f32) -> Vec<GradientStop> {
    let straight: Vec<_> = gradient.stops.iter().map(|s| s.color.scaled(opacity).to_straight()).collect();
    let visible = |i: usize| straight[i].3 > 0.0;
    let mut stops = Vec::with_capacity(straight.len());
    for (i, stop) in gradient.stops.iter().enumerate() {
        let (mut r, mut g, mut b, a) = straight[i];
        if !visible(i) {
            let before = (0..i).rev().find(|&j| visible(j));
            let after = (i + 1..straight.len()).find(|&j| visible(j));
            if let Some(j) = before.or(after) {
                (r, g, b) = (straight[j].0, straight[j].1, straight[j].2);
            }
        }
        stops.push(GradientStop::new(stop.t.clamp(0.0, 1.0), straight_color(r, g, b, a)));
    }
    stops
}

fn straight_color(r: f32, g: f32, b: f32, a: f32) -> tiny_skia::Color {
    let unit = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    tiny_skia::Color::from_rgba(unit(r), unit(g), unit(b), unit(a)).unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn to_skia(c: Color) -> tiny_skia::Color {
    let (r, g, b, a) = c.to_straight();
    straight_color(r, g, b, a)
}

fn from_skia(p: PremultipliedColorU8) -> Color {
    let f = |v: u8| f32::from(v) / 255.0;
    Color::from_premul(f(p.red()), f(p.green()), f(p.blue()), f(p.alpha()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::ColorStop;

    fn red(a: f32) -> Color {
        Color::from_straight(1.0, 0.0, 0.0, a)
    }

    fn blob(center: Vec2, edge: Vec2) -> RadialGradient {
        RadialGradient::new(
            center,
            edge,
            vec![
                ColorStop::new(0.0, red(1.0)),
                ColorStop::new(0.8, red(0.5)),
                ColorStop::new(1.0, red(0.0)),
            ],
        )
    }

    #[test]
    fn radial_fill_is_bright_in_center_and_empty_outside() {
        let mut c = Canvas::new(40, 40);
        c.fill_radial(&blob(Vec2::new(20.0, 20.0), Vec2::new(30.0, 30.0)), 1.0);
        assert!(c.pixel(20, 20).is_some_and(|p| p.a > 0.9));
        assert_eq!(c.pixel(0, 0), Some(Color::transparent()));
        assert_eq!(c.pixel(39, 20), Some(Color::transparent()));
    }

    #[test]
    fn opacity_scales_fill() {
        let mut c = Canvas::new(10, 10);
        c.fill_radial(&blob(Vec2::new(5.0, 5.0), Vec2::new(50.0, 50.0)), 0.5);
        let p = c.pixel(5, 5).unwrap_or_default();
        assert!(p.a > 0.45 && p.a <= 0.5);
    }

    #[test]
    fn offscreen_gradient_is_skipped() {
        let mut c = Canvas::new(10, 10);
        c.fill_radial(&blob(Vec2::new(-50.0, -50.0), Vec2::new(-45.0, -45.0)), 1.0);
        assert!(c.pixels().iter().all(|p| *p == Color::transparent()));
    }

    #[test]
    fn composite_rejects_size_mismatch() {
        let mut c = Canvas::new(4, 4);
        assert!(c.composite(&Canvas::new(3, 4), BlendMode::SourceOver).is_err());
        assert!(c.composite(&Canvas::new(4, 4), BlendMode::Overlay).is_ok());
    }

    #[test]
    fn rounded_mask_clears_corners_only() {
        let mut c = Canvas::new(20, 20);
        c.clear(red(1.0));
        c.mask_rounded(8.0);
        assert_eq!(c.pixel(0, 0), Some(Color::transparent()));
        assert_eq!(c.pixel(10, 10), Some(red(1.0)));
        assert_eq!(c.pixel(10, 1), Some(red(1.0)));
        assert_eq!(c.pixel(1, 10), Some(red(1.0)));
    }

    #[test]
    fn rgba8_encodings() {
        let mut c = Canvas::new(1, 1);
        c.clear(Color::from_straight(1.0, 0.0, 0.0, 0.5));
        assert_eq!(c.premultiplied_rgba8(), &[128, 0, 0, 128]);
        assert_eq!(c.to_rgba8_straight(), vec![255, 0, 0, 128]);
    }

    #[test]
    fn overlay_brightens_with_white_and_keeps_grey_neutral() {
        let grey = Color::from_srgb_u8(128, 128, 128, 255);
        let mut base = Canvas::new(2, 1);
        base.clear(grey);
        let mut layer = Canvas::new(2, 1);
        layer.clear(Color::from_srgb_u8(255, 255, 255, 255));
        let mut dark = Canvas::new(2, 1);
        dark.clear(Color::from_srgb_u8(40, 40, 40, 255));
        let mut light = Canvas::new(2, 1);
        light.clear(Color::from_srgb_u8(220, 220, 220, 255));

        dark.composite(&layer, BlendMode::Overlay).unwrap();
        light.composite(&base, BlendMode::Overlay).unwrap();
        // Overlay with mid grey is close to identity; with white it brightens.
        assert!(dark.pixel(0, 0).is_some_and(|p| p.r > 40.0 / 255.0 && (p.a - 1.0).abs() < 1e-6));
        assert!(light.pixel(1, 0).is_some_and(|p| (p.r - 220.0 / 255.0).abs() < 0.02));
    }

    #[test]
    fn transparent_layer_leaves_base_alone() {
        let mut c = Canvas::new(3, 3);
        c.clear(red(1.0));
        c.composite(&Canvas::new(3, 3), BlendMode::Overlay).unwrap();
        assert!(c.pixels().iter().all(|p| *p == red(1.0)));
    }

    #[test]
    fn zero_sized_canvas_ignores_drawing() {
        let mut c = Canvas::new(0, 5);
        c.clear(red(1.0));
        c.fill_radial(&blob(Vec2::new(0.0, 0.0), Vec2::new(3.0, 3.0)), 1.0);
        c.blur(2);
        c.mask_rounded(4.0);
        assert!(c.pixels().is_empty());
        assert!(c.premultiplied_rgba8().is_empty());
        assert_eq!(c.height(), 5);
    }

    #[test]
    fn resize_clears() {
        let mut c = Canvas::new(2, 2);
        c.clear(red(1.0));
        c.resize(2, 2);
        assert_eq!(c.pixel(1, 1), Some(red(1.0)));
        c.resize(3, 1);
        assert_eq!(c.pixels().len(), 3);
        assert_eq!(c.pixel(2, 0), Some(Color::transparent()));
    }
}
