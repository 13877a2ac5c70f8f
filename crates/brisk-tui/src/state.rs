//! Application state composition.
//!
//! `AppState` is the view composer: it owns the counter, the debounced text
//! field, the memoized showcase data, the lazily loaded dashboard and the
//! metrics probe, and hands out the timers each of them arms.
//!
//! ```text
//! AppState
//! ├── focus: Focus               (counter / text field / dashboard toggle)
//! ├── counter: u64
//! ├── input: InputState          (text field + debounce gate)
//! ├── showcase: ShowcaseState    (memoized derived data)
//! ├── dashboard: DashboardState  (lazy module + mounted view)
//! ├── metrics: MetricsState      (probe + environment counters)
//! ├── task_seq: TaskSeq
//! └── tasks: Tasks
//! ```

use std::sync::Arc;

use brisk_core::config::Config;
use brisk_core::metrics::EnvironmentCounters;

use crate::common::{TaskSeq, Tasks};
use crate::dashboard::DashboardState;
use crate::effects::UiEffect;
use crate::input::InputState;
use crate::metrics::MetricsState;
use crate::showcase::{ShowcaseSizes, ShowcaseState};
use crate::statusline::{StatusLine, StatusLineAccumulator};
use crate::{dashboard, input, metrics};

/// Focusable controls, in Tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Counter,
    Text,
    DashboardToggle,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Counter => Focus::Text,
            Focus::Text => Focus::DashboardToggle,
            Focus::DashboardToggle => Focus::Counter,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Counter => Focus::DashboardToggle,
            Focus::Text => Focus::Counter,
            Focus::DashboardToggle => Focus::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Counter => "counter",
            Focus::Text => "text",
            Focus::DashboardToggle => "dashboard",
        }
    }
}

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub focus: Focus,
    /// Increments on every press; has no effect on derived data.
    pub counter: u64,
    pub input: InputState,
    pub showcase: ShowcaseState,
    pub dashboard: DashboardState,
    pub metrics: MetricsState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    pub config: Config,
    /// Spinner animation frame counter (loading indicator).
    pub spinner_frame: usize,
    /// Status line accumulator for FPS tracking.
    pub status_line: StatusLineAccumulator,
    /// Set after the first frame mounted the view.
    pub mounted: bool,
    /// Set once teardown has cancelled every timer.
    pub disposed: bool,
}

impl AppState {
    pub fn new(config: Config, counters: Arc<dyn EnvironmentCounters>) -> Self {
        Self {
            should_quit: false,
            focus: Focus::default(),
            counter: 0,
            input: InputState::new(config.debounce()),
            showcase: ShowcaseState::new(ShowcaseSizes::from(&config)),
            dashboard: DashboardState::default(),
            metrics: MetricsState::new(counters),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            config,
            spinner_frame: 0,
            status_line: StatusLineAccumulator::new(),
            mounted: false,
            disposed: false,
        }
    }

    /// Cancels every pending timer and in-flight task. Idempotent.
    pub fn dispose(&mut self) -> Vec<UiEffect> {
        if self.disposed {
            return vec![];
        }
        self.disposed = true;
        let mut effects = input::dispose(&mut self.input);
        effects.extend(dashboard::dispose(&mut self.dashboard, &self.tasks));
        effects.extend(metrics::dispose(&mut self.metrics));
        tracing::debug!(cancelled = effects.len(), "view disposed");
        effects
    }

    /// Snapshot for the status line.
    pub fn status(&self) -> StatusLine {
        StatusLine {
            focus: self.focus.label(),
            debounce: if self.input.gate.is_pending() {
                "pending"
            } else {
                "idle"
            },
            processed: self.input.processed_count(),
            fps: self.status_line.fps(),
        }
    }
}
