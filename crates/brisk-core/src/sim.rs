//! Deterministic virtual-time event loop for unit tests.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::schedule::{Ticket, TimerCommand};

struct Armed {
    due: Duration,
    seq: u64,
    ticket: Ticket,
    cancel: CancellationToken,
}

/// Executes `TimerCommand`s against a virtual clock.
pub(crate) struct VirtualLoop {
    base: Instant,
    elapsed: Duration,
    armed: Vec<Armed>,
    seq: u64,
}

impl VirtualLoop {
    pub(crate) fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Duration::ZERO,
            armed: Vec::new(),
            seq: 0,
        }
    }

    pub(crate) fn now(&self) -> Instant {
        self.base + self.elapsed
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) fn apply(&mut self, commands: impl IntoIterator<Item = TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::Arm {
                    ticket,
                    delay,
                    cancel,
                } => {
                    self.seq += 1;
                    self.armed.push(Armed {
                        due: self.elapsed + delay,
                        seq: self.seq,
                        ticket,
                        cancel,
                    });
                }
                TimerCommand::Cancel { ticket, cancel } => {
                    cancel.cancel();
                    self.armed.retain(|a| a.ticket != ticket);
                }
            }
        }
    }

    /// Moves the clock forward by `by` without firing anything.
    pub(crate) fn sleep(&mut self, by: Duration) {
        self.elapsed += by;
    }

    /// Pops the earliest timer due at or before `elapsed + by`, moving the
    /// clock to its deadline. Ties fire in arm order.
    pub(crate) fn next_within(&mut self, by: Duration) -> Option<Ticket> {
        let limit = self.elapsed + by;
        let idx = self
            .armed
            .iter()
            .enumerate()
            .filter(|(_, a)| a.due <= limit && !a.cancel.is_cancelled())
            .min_by_key(|(_, a)| (a.due, a.seq))
            .map(|(i, _)| i)?;
        let armed = self.armed.remove(idx);
        self.elapsed = self.elapsed.max(armed.due);
        Some(armed.ticket)
    }

    /// Advances the clock by `by`, returning every ticket that fired on the way.
    pub(crate) fn advance(&mut self, by: Duration) -> Vec<Ticket> {
        let target = self.elapsed + by;
        let mut fired = Vec::new();
        while let Some(ticket) = self.next_within(target - self.elapsed) {
            fired.push(ticket);
        }
        self.elapsed = target;
        fired
    }

    pub(crate) fn armed_count(&self) -> usize {
        self.armed
            .iter()
            .filter(|a| !a.cancel.is_cancelled())
            .count()
    }
}
