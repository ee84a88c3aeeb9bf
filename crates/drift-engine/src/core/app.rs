use crate::input::HostEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by hosts.
pub trait App {
    /// Called for every translated host event. `now` is the window clock's
    /// elapsed time in seconds, the same base frames use.
    fn on_event(&mut self, event: HostEvent, now: f64) -> AppControl {
        let _ = (event, now);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Whether the runtime should keep redrawing without new events.
    ///
    /// Apps whose content is static (animation stopped or paused) return false
    /// and only redraw in response to events.
    fn wants_continuous_redraw(&self) -> bool {
        true
    }
}
