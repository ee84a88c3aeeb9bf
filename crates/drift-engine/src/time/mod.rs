//! Time subsystem.
//!
//! - `FrameClock`: one per window, ticked once per presented frame; provides
//!   the host time base.
//! - `LayerClock`: per animated layer; maps host time to a local time that can
//!   be frozen and resumed.

mod frame_clock;
mod layer_clock;

pub use frame_clock::{FrameClock, FrameTime};
pub use layer_clock::LayerClock;
