//! Single-deadline debounce timer.
//!
//! The timer holds at most one pending deadline. Arming replaces it, firing
//! consumes it, cancelling drops it. Time is passed in by the caller so the
//! host's event loop (or a test) owns the clock.

use std::time::{Duration, Instant};

/// Quiet period after the last scroll tick before a settled measurement.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(100);

/// Debounce timer with at most one live deadline.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Create an idle timer with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// Quiet period this timer waits for.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Arm the timer to fire one quiet period after `now`.
    ///
    /// Returns `true` if a pending deadline was replaced.
    pub fn arm(&mut self, now: Instant) -> bool {
        self.deadline.replace(now + self.quiet_period).is_some()
    }

    /// Drop the pending deadline, if any.
    ///
    /// Returns `true` if a deadline was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Pending deadline, if armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed.
    ///
    /// Returns `true` exactly once per armed deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
