//! drift engine crate.
//!
//! Platform, math and compositing pieces used by the bubble animation layer:
//! geometry, paint, timing, easing, a software compositor, and a winit/wgpu
//! host that presents composited frames.

pub mod anim;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod render;
pub mod time;
pub mod window;
