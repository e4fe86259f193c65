#![forbid(unsafe_code)]

//! Deferred deadlines and cooldown guards.
//!
//! Browser code usually reaches for `setTimeout` handles and mutable flags.
//! Here both are explicit values checked against host time:
//!
//! - [`OneShot`]: a single deferred callback. The owner polls it with the
//!   current time and acts when it reports that it fired. Cancelling it (for
//!   example on teardown) guarantees it never fires.
//! - [`Cooldown`]: a re-entrancy guard that rejects entry while a window is
//!   open and reopens automatically once the window elapses.
//!
//! # Invariants
//!
//! 1. A `OneShot` fires at most once per `arm`.
//! 2. A cancelled `OneShot` never fires until re-armed.
//! 3. `Cooldown::try_enter` succeeds at most once per open window.

use core::time::Duration;

/// Single deferred deadline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OneShot {
    deadline: Option<Duration>,
}

impl OneShot {
    /// Create a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Disarm the timer without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline, if armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Fire if the deadline has been reached, disarming the timer.
    ///
    /// Returns `true` exactly once per arm.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Re-entrancy guard with a timer-driven reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    window: Duration,
    open_until: Option<Duration>,
}

impl Cooldown {
    /// Create an idle guard whose windows last `window`.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            open_until: None,
        }
    }

    /// Configured window length.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Whether a window is open at `now`.
    #[must_use]
    pub fn is_active(&self, now: Duration) -> bool {
        self.open_until.is_some_and(|until| now < until)
    }

    /// Try to enter the guarded section.
    ///
    /// Succeeds and opens a new window when no window is open at `now`;
    /// otherwise leaves the current window untouched and returns `false`.
    pub fn try_enter(&mut self, now: Duration) -> bool {
        if self.is_active(now) {
            return false;
        }
        self.open_until = Some(now.saturating_add(self.window));
        true
    }

    /// Close the window immediately.
    pub fn reset(&mut self) {
        self.open_until = None;
    }
}
