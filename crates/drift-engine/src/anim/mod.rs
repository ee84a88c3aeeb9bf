//! Framework-free property animation.
//!
//! A [`Transition`] is a declarative description (from, to, begin, duration,
//! easing); callers evaluate it at whatever time their clock reports.

mod easing;
mod transition;

pub use easing::{CubicBezier, Easing, Spring};
pub use transition::{Lerp, Transition};
