//! Paint model shared by the compositor and layers.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - radial gradients with arbitrary stops

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, RadialGradient};
