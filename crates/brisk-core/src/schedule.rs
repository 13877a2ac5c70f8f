//! Deferred-callback primitives shared by the state machines.
//!
//! State machines never own a running timer. They hand `TimerCommand`s to the
//! event loop, which arms a sleep per `Ticket` and reports back when it
//! elapses. A fired ticket is only honoured while it is still the pending one,
//! so a cancel that races an already-delivered fire is harmless.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one armed deferred callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// Allocates a ticket never handed out before in this process.
    pub fn fresh() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Request for the event loop to arm or disarm a deferred callback.
#[derive(Debug, Clone)]
pub enum TimerCommand {
    /// Sleep for `delay`, then report `ticket` unless `cancel` fires first.
    Arm {
        ticket: Ticket,
        delay: Duration,
        cancel: CancellationToken,
    },
    /// Stop the sleep armed for `ticket`.
    Cancel {
        ticket: Ticket,
        cancel: CancellationToken,
    },
}

impl TimerCommand {
    pub fn ticket(&self) -> Ticket {
        match self {
            TimerCommand::Arm { ticket, .. } | TimerCommand::Cancel { ticket, .. } => *ticket,
        }
    }

    /// Executes a `Cancel` in place. `Arm` is left to the event loop.
    pub fn cancel_now(&self) {
        if let TimerCommand::Cancel { cancel, .. } = self {
            cancel.cancel();
        }
    }
}

#[derive(Debug)]
struct Pending<T> {
    ticket: Ticket,
    deadline: Instant,
    cancel: CancellationToken,
    payload: T,
}

/// A slot holding at most one pending deferred action.
#[derive(Debug)]
pub struct DeferredSlot<T> {
    pending: Option<Pending<T>>,
}

impl<T> Default for DeferredSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DeferredSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a new action, replacing (and cancelling) any pending one.
    ///
    /// Returns the commands for the event loop in execution order: the
    /// cancellation of the replaced ticket first, then the new arm.
    pub fn arm(&mut self, now: Instant, delay: Duration, payload: T) -> Vec<TimerCommand> {
        let mut commands = Vec::with_capacity(2);
        commands.extend(self.cancel());

        let ticket = Ticket::fresh();
        let cancel = CancellationToken::new();
        self.pending = Some(Pending {
            ticket,
            deadline: now + delay,
            cancel: cancel.clone(),
            payload,
        });
        commands.push(TimerCommand::Arm {
            ticket,
            delay,
            cancel,
        });
        commands
    }

    /// Takes the payload if `ticket` is the pending one. Stale tickets yield `None`.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            self.pending.take().map(|p| p.payload)
        } else {
            None
        }
    }

    /// Disarms the pending action, if any.
    pub fn cancel(&mut self) -> Option<TimerCommand> {
        self.pending.take().map(|p| TimerCommand::Cancel {
            ticket: p.ticket,
            cancel: p.cancel,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ticket(&self) -> Option<Ticket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn payload(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_are_unique() {
        let a = Ticket::fresh();
        let b = Ticket::fresh();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_rearm_cancels_previous_first() {
        let now = Instant::now();
        let mut slot = DeferredSlot::new();
        let first = slot.arm(now, Duration::from_millis(10), "a");
        assert_eq!(first.len(), 1);
        let old = first[0].ticket();

        let second = slot.arm(now, Duration::from_millis(10), "b");
        assert_eq!(second.len(), 2);
        match &second[0] {
            TimerCommand::Cancel { ticket, .. } => assert_eq!(*ticket, old),
            other => panic!("expected cancel, got {other:?}"),
        }
        assert!(matches!(second[1], TimerCommand::Arm { .. }));
        assert_eq!(slot.payload(), Some(&"b"));
    }

    #[test]
    fn test_cancel_command_trips_token() {
        let mut slot = DeferredSlot::new();
        let armed = slot.arm(Instant::now(), Duration::ZERO, ());
        let TimerCommand::Arm { cancel, .. } = &armed[0] else {
            panic!("expected arm");
        };
        let cmd = slot.cancel().unwrap();
        cmd.cancel_now();
        assert!(cancel.is_cancelled());
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let now = Instant::now();
        let mut slot = DeferredSlot::new();
        let old = slot.arm(now, Duration::from_millis(5), 1)[0].ticket();
        let new = slot.arm(now, Duration::from_millis(5), 2)[1].ticket();

        assert_eq!(slot.fire(old), None);
        assert!(slot.is_pending());
        assert_eq!(slot.fire(new), Some(2));
        assert_eq!(slot.fire(new), None);
    }

    #[test]
    fn test_deadline_is_measured_from_arm_time() {
        let now = Instant::now();
        let mut slot = DeferredSlot::new();
        slot.arm(now, Duration::from_millis(300), ());
        assert_eq!(slot.deadline(), Some(now + Duration::from_millis(300)));
    }
}
