//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent timers, I/O and task spawning only (no direct UI mutations).

use brisk_core::schedule::TimerCommand;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind, TimerKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Arm or disarm a deferred callback owned by `kind`.
    Timer {
        kind: TimerKind,
        command: TimerCommand,
    },

    /// Fetch the heavy dashboard module through the injected loader.
    LoadDashboard { task: TaskId },

    /// Run the debounced text action for the latest value.
    ProcessText { value: String },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}

impl UiEffect {
    /// Wraps timer commands from a state machine into effects.
    pub fn timers(kind: TimerKind, commands: impl IntoIterator<Item = TimerCommand>) -> Vec<Self> {
        commands
            .into_iter()
            .map(|command| UiEffect::Timer { kind, command })
            .collect()
    }
}
