//! Software compositor.
//!
//! A [`Canvas`] wraps a premultiplied `tiny_skia::Pixmap`. Radial gradients
//! are filled with tiny-skia shaders, layers are combined with its
//! [`BlendMode`]s, then the canvas is blurred and masked. The result is either
//! uploaded to the GPU by the blit renderer or encoded to an image file.

mod blur;
mod canvas;

pub use canvas::Canvas;
pub use tiny_skia::BlendMode;
