//! Coordinate and geometry types shared by the compositor, renderers and layers.
//!
//! Two spaces are in use:
//! - logical pixels (origin top-left, +X right, +Y down) for frames and surfaces
//! - unit space (`[0, 1]` per axis of a frame) for gradient points on a layer

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
