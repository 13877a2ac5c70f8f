//! UI event types.
//!
//! All external inputs (terminal, timers, async results) are converted to
//! `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Deferred work sends events directly to the runtime's inbox. Fired timers
//! arrive as `TimerFired`; the dashboard loader reports through the uniform
//! `TaskStarted`/`TaskCompleted` lifecycle.
//!
//! ## Cancellation Convention
//!
//! Timers and cancelable tasks use `tokio_util::sync::CancellationToken`.
//! The reducer decides when to cancel and the runtime calls `token.cancel()`.
//! A fired ticket that is no longer pending is dropped by its owner, so a
//! cancel that loses the race never double-fires.

use brisk_core::loader::DashboardModule;
use brisk_core::schedule::Ticket;
use crossterm::event::Event as CrosstermEvent;

use crate::common::{TaskCompleted, TaskKind, TaskStarted, TimerKind};

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (for animation, polling).
    Tick,

    /// Emitted once per loop iteration before other events are processed.
    Frame { width: u16, height: u16 },

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// A deferred callback armed through `UiEffect::Timer` elapsed.
    TimerFired { kind: TimerKind, ticket: Ticket },

    /// Lazy dashboard module fetch finished.
    DashboardLoaded(Result<DashboardModule, String>),

    /// Task lifecycle: runtime started a task (cancel token optional).
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}
