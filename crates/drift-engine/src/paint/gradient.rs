use crate::coords::{Rect, Vec2};

use super::Color;

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Elliptical radial gradient in pixel space.
///
/// Semantics:
/// - `center` is the inner focus (gradient parameter `t = 0`).
/// - `edge` is a corner of the bounding box of the `t = 1` ellipse; the ellipse
///   radii are `|edge.x - center.x|` and `|edge.y - center.y|`.
/// - Stops are premultiplied and sorted by `t`. Outside `[first.t, last.t]` the
///   edge stops are extended (pad).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub edge: Vec2,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Vec2, edge: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { center, edge, stops }
    }

    #[inline]
    pub fn radii(&self) -> Vec2 {
        (self.edge - self.center).abs()
    }

    /// Bounding box of the `t = 1` ellipse.
    pub fn bounds(&self) -> Rect {
        let r = self.radii();
        Rect::from_origin_size(self.center - r, r * 2.0)
    }

    /// True when everything outside the `t = 1` ellipse is transparent.
    pub fn fades_out(&self) -> bool {
        self.stops.last().is_none_or(|s| s.t <= 1.0 && s.color.a <= 0.0)
    }

    /// Returns true when the definition can be rasterized.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.edge.is_finite()
            && !self.stops.is_empty()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.windows(2).all(|w| w[0].t <= w[1].t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(a: f32) -> Color {
        Color::from_straight(1.0, 1.0, 1.0, a)
    }

    fn blob() -> RadialGradient {
        RadialGradient::new(
            Vec2::new(50.0, 50.0),
            Vec2::new(60.0, 70.0),
            vec![
                ColorStop::new(0.0, white(1.0)),
                ColorStop::new(0.8, white(0.5)),
                ColorStop::new(1.0, white(0.0)),
            ],
        )
    }

    #[test]
    fn radii_ignore_edge_quadrant() {
        let mut g = blob();
        assert_eq!(g.radii(), Vec2::new(10.0, 20.0));
        g.edge = Vec2::new(40.0, 30.0);
        assert_eq!(g.radii(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn unsorted_or_empty_stops_are_invalid() {
        let mut g = blob();
        g.stops.swap(0, 2);
        assert!(!g.is_valid());
        g.stops.clear();
        assert!(!g.is_valid());
    }

    #[test]
    fn bounds_cover_ellipse() {
        let b = blob().bounds();
        assert_eq!(b, Rect::new(40.0, 30.0, 20.0, 40.0));
        assert!(blob().fades_out());
        assert!(blob().is_valid());
    }
}
