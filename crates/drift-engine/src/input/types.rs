/// Host lifecycle signals, already translated from platform events.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    /// The view is on screen for the first time.
    Appeared,
    /// The view is about to go away for good.
    Disappearing,
    /// The app is leaving the foreground (suspended, unfocused, occluded).
    WillSuspend,
    /// The app is back in the foreground.
    DidResume,
}

/// The keys the host reacts to. Everything else is `Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    P,
    S,
    Up,
    Down,
    Other,
}

/// Platform-agnostic event delivered to [`App::on_event`](crate::core::App::on_event).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostEvent {
    Lifecycle(Lifecycle),
    /// New logical size of the window.
    Resized { width: f32, height: f32 },
    /// Key pressed (repeats are filtered).
    KeyPressed(Key),
    /// Primary button pressed at a logical position.
    Click { x: f32, y: f32 },
}
