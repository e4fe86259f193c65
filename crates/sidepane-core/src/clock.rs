#![forbid(unsafe_code)]

//! Deterministic monotonic clock controlled by the host.

use core::time::Duration;

/// Monotonic clock advanced explicitly by the embedding host.
///
/// Browser hosts typically feed `performance.now()` deltas; tests advance it
/// by hand so that deferred behavior is reproducible.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Time never moves backwards.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}
