//! N-way join barrier.
//!
//! The loader starts N independent resolutions (fetches, or immediate inline
//! reads) and may only finish once every one of them has settled. Each
//! settlement calls [`JoinBarrier::arrive`]; the arrival that brings the
//! count to zero is told so, exactly once, whatever the arrival order.

/// Result of one arrival at the barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Still waiting for this many arrivals.
    Waiting(usize),
    /// This arrival completed the barrier.
    Complete,
    /// The barrier had already completed; the arrival is ignored.
    AlreadyComplete,
}

/// Countdown from N to zero that completes once.
#[derive(Debug, Clone)]
pub struct JoinBarrier {
    remaining: usize,
    complete: bool,
}

impl JoinBarrier {
    /// A barrier waiting for `count` arrivals.
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            remaining: count,
            complete: false,
        }
    }

    /// Record one settled operation.
    pub fn arrive(&mut self) -> Arrival {
        if self.complete {
            return Arrival::AlreadyComplete;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.complete = true;
            Arrival::Complete
        } else {
            Arrival::Waiting(self.remaining)
        }
    }

    /// Arrivals still outstanding.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Whether completion has fired.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }
}
