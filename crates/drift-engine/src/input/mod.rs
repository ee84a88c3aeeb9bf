//! Host events.
//!
//! The window runtime translates winit events into these types so applications
//! never depend on winit directly.

mod types;

pub use types::{HostEvent, Key, Lifecycle};
