/// Local time base of an animated layer.
///
/// Local time normally runs in lockstep with host time, offset by `shift`.
/// Freezing pins local time to the value it had at the freeze; thawing moves the
/// offset by the time spent frozen, so local time resumes from the pinned value.
/// In-flight transitions are expressed in local time and therefore continue
/// exactly where they stopped.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LayerClock {
    shift: f64,
    frozen_at: Option<f64>,
}

impl LayerClock {
    pub const fn new() -> Self {
        Self { shift: 0.0, frozen_at: None }
    }

    /// Local time at host time `host`.
    #[inline]
    pub fn local(&self, host: f64) -> f64 {
        self.frozen_at.unwrap_or(host - self.shift)
    }

    /// Pins local time. Freezing an already frozen clock keeps the first pin.
    pub fn freeze(&mut self, host: f64) {
        if self.frozen_at.is_none() {
            self.frozen_at = Some(self.local(host));
        }
    }

    /// Releases the pin; the host time spent frozen is skipped over.
    /// Thawing a running clock does nothing.
    pub fn thaw(&mut self, host: f64) {
        if let Some(pinned) = self.frozen_at.take() {
            self.shift = host - pinned;
        }
    }

    /// Back to lockstep with host time.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_clock_tracks_host() {
        let c = LayerClock::new();
        assert_eq!(c.local(3.5), 3.5);
    }

    #[test]
    fn frozen_clock_stands_still() {
        let mut c = LayerClock::new();
        c.freeze(2.0);
        assert_eq!(c.local(2.0), 2.0);
        assert_eq!(c.local(10.0), 2.0);
    }

    #[test]
    fn thaw_continues_from_pin() {
        let mut c = LayerClock::new();
        c.freeze(2.0);
        c.thaw(5.0);
        assert_eq!(c.local(5.0), 2.0);
        assert_eq!(c.local(6.5), 3.5);
    }

    #[test]
    fn double_freeze_keeps_first_pin() {
        let mut c = LayerClock::new();
        c.freeze(1.0);
        c.freeze(4.0);
        assert_eq!(c.local(9.0), 1.0);
    }

    #[test]
    fn thaw_of_running_clock_is_noop() {
        let mut c = LayerClock::new();
        c.thaw(4.0);
        assert_eq!(c.local(4.0), 4.0);
        assert_eq!(c, LayerClock::new());
    }

    #[test]
    fn repeated_pauses_accumulate() {
        let mut c = LayerClock::new();
        c.freeze(1.0);
        c.thaw(2.0);
        c.freeze(3.0);
        c.thaw(5.0);
        assert_eq!(c.local(5.0), 2.0);
    }
}
