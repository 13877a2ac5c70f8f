//! Debounce gate for bursty input.
//!
//! ```text
//! Idle --notify--> Pending(deadline)
//! Pending --notify--> Pending(new deadline)   old ticket cancelled
//! Pending --fire(ticket)--> Idle              action runs with latest value
//! Pending --dispose--> Disposed               action never runs
//! ```
//!
//! The gate owns its pending timer handle explicitly. Callers forward the
//! returned `TimerCommand`s to the event loop and route fired tickets back
//! through `fire`.

use std::time::{Duration, Instant};

use crate::schedule::{DeferredSlot, Ticket, TimerCommand};

/// Default quiet interval.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(300);

/// Observable phase of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Idle,
    Pending { deadline: Instant },
    Disposed,
}

#[derive(Debug)]
pub struct DebounceGate<T> {
    quiet: Duration,
    slot: DeferredSlot<T>,
    fired: u64,
    disposed: bool,
}

impl<T> DebounceGate<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            slot: DeferredSlot::new(),
            fired: 0,
            disposed: false,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Records `value` and restarts the quiet interval from `now`.
    ///
    /// Returns the commands to run: a cancel for the replaced action (if one
    /// was pending) followed by the new arm. A disposed gate ignores input.
    pub fn notify(&mut self, value: T, now: Instant) -> Vec<TimerCommand> {
        if self.disposed {
            return Vec::new();
        }
        self.slot.arm(now, self.quiet, value)
    }

    /// Completes the pending action if `ticket` is current, yielding the
    /// latest notified value. Stale or cancelled tickets yield `None`.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        let value = self.slot.fire(ticket)?;
        self.fired += 1;
        Some(value)
    }

    /// Cancels any pending action. The gate stays inert afterwards.
    pub fn dispose(&mut self) -> Option<TimerCommand> {
        self.disposed = true;
        self.slot.cancel()
    }

    pub fn phase(&self) -> GatePhase {
        if self.disposed {
            GatePhase::Disposed
        } else if let Some(deadline) = self.slot.deadline() {
            GatePhase::Pending { deadline }
        } else {
            GatePhase::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    pub fn pending_value(&self) -> Option<&T> {
        self.slot.payload()
    }

    /// Number of actions that have fired so far.
    pub fn fire_count(&self) -> u64 {
        self.fired
    }
}

impl<T> Default for DebounceGate<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}
