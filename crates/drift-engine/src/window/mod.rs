//! Window + runtime loop.
//!
//! Owns the winit event loop and the single window, wires the window to the
//! GPU layer, and translates platform events into [`HostEvent`](crate::input::HostEvent)s.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
