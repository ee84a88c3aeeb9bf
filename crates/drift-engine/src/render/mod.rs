//! GPU presentation.
//!
//! Composition happens on the CPU (`raster`); the GPU side only uploads the
//! finished frame and draws it into a rectangle of the window.
//!
//! Convention: rectangles are in logical pixels (top-left origin, +Y down); the
//! vertex shader converts to NDC using a viewport uniform.

mod common;
mod ctx;
mod image;

pub use ctx::{RenderCtx, RenderTarget};
pub use image::ImageRenderer;
