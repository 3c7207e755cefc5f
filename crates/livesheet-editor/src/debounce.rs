//! Single-deadline debouncing.
//!
//! Writing a sheet back into the page restarts every CSS animation and
//! transition on it. Writing on every keystroke makes the page flicker while
//! typing, so keystrokes only push a deadline forward and the write happens
//! once typing pauses.
//!
//! There is at most one deadline. Scheduling again replaces it.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// What [`Debouncer::schedule`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Debouncing is disabled: act now.
    Immediate,
    /// Act once this deadline passes without another schedule.
    Deferred(Instant),
}

/// A cancel-and-replace deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Option<Duration>,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// A debouncer waiting `delay` after the last trigger. `None` disables it.
    #[must_use]
    pub const fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Register a trigger, restarting the wait.
    pub fn schedule(&mut self) -> Schedule {
        match self.delay {
            Some(delay) => {
                let deadline = Instant::now() + delay;
                self.deadline = Some(deadline);
                Schedule::Deferred(deadline)
            }
            None => Schedule::Immediate,
        }
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clear and report the deadline if it has passed by `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Sleep until `deadline`, or forever when there is none.
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
