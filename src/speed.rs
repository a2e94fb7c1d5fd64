use std::time::Duration;

/// Derives the tick interval from feeding progress.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedController {
    initial_ms: u64,
    min_ms: u64,
    step_ms: u64,
}

impl SpeedController {
    #[must_use]
    pub fn new(initial_ms: u64, min_ms: u64, step_ms: u64) -> Self {
        Self {
            initial_ms,
            min_ms,
            step_ms,
        }
    }

    /// Interval a fresh game starts with.
    #[must_use]
    pub fn initial_interval_ms(self) -> u64 {
        self.initial_ms
    }

    #[must_use]
    pub fn min_interval_ms(self) -> u64 {
        self.min_ms
    }

    /// Shortens the interval by one step after a feeding move, floored at the minimum.
    #[must_use]
    pub fn on_feed(self, current_ms: u64) -> u64 {
        current_ms.saturating_sub(self.step_ms).max(self.min_ms)
    }
}

/// Converts an interval in milliseconds into a timer period.
#[must_use]
pub fn tick_period(interval_ms: u64) -> Duration {
    Duration::from_millis(interval_ms)
}
