//! Event loop and effect executor.
//!
//! `update` never performs I/O. Whatever it asks for comes back here as a
//! `UiEffect`: timers become sleeping tokio tasks, the dashboard fetch
//! becomes a tracked task, and the debounced text action is logged inline.
//! Everything asynchronous reports back through one unbounded inbox, which
//! the loop drains before each batch of terminal input.

mod handlers;
mod inbox;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use brisk_core::config::Config;
use brisk_core::loader::DashboardLoader;
use brisk_core::metrics::EnvironmentCounters;
use brisk_core::schedule::TimerCommand;
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted, TimerKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while a timer, load or interaction is in flight (~60fps).
pub const ACTIVE_TICK: Duration = Duration::from_millis(16);

/// Tick interval when nothing is moving.
pub const IDLE_TICK: Duration = Duration::from_millis(100);

/// Owns the terminal and `AppState`; restores the terminal on drop.
pub struct TuiRuntime {
    terminal: terminal::Tui,
    pub state: AppState,
    loader: Arc<dyn DashboardLoader>,
    events_tx: UiEventSender,
    events_rx: UiEventReceiver,
    last_tick: Instant,
    last_draw: Instant,
    /// Keeps the loop on the active tick briefly after a keypress.
    last_input: Instant,
}

impl TuiRuntime {
    /// Switches the terminal into TUI mode and builds the initial state.
    pub fn new(
        config: Config,
        counters: Arc<dyn EnvironmentCounters>,
        loader: Arc<dyn DashboardLoader>,
    ) -> Result<Self> {
        // Must be in place before the alternate screen is entered
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let started = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config, counters),
            loader,
            events_tx,
            events_rx,
            last_tick: started,
            last_draw: started,
            last_input: started,
        })
    }

    /// Runs until quit, then tears the view down even if the loop failed.
    pub fn run(&mut self) -> Result<()> {
        let outcome = self.event_loop();
        let teardown = self.state.dispose();
        self.apply(teardown);
        outcome
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut needs_draw = true;

        while !self.state.should_quit {
            let size = self.terminal.size()?;
            let frame = UiEvent::Frame {
                width: size.width,
                height: size.height,
            };
            // Frame goes first so memoized data is current for the batch
            let batch = std::iter::once(frame).chain(self.next_batch()?);

            for event in batch {
                match &event {
                    UiEvent::Frame { .. } => {}
                    UiEvent::Terminal(_) => {
                        self.last_input = Instant::now();
                        needs_draw = true;
                    }
                    _ => needs_draw = true,
                }
                let effects = update::update(&mut self.state, event);
                self.apply(effects);
            }

            if needs_draw && !self.state.should_quit {
                self.draw()?;
                needs_draw = false;
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let since_last = self.last_draw.elapsed();
        self.last_draw = Instant::now();
        let state = &self.state;
        self.terminal.draw(|frame| render::render(state, frame))?;
        self.state.status_line.on_frame(since_last);
        Ok(())
    }

    fn tick_interval(&self) -> Duration {
        let busy = self.state.input.gate.is_pending()
            || self.state.dashboard.is_loading()
            || self.state.dashboard.is_populating()
            || self.state.tasks.is_any_running()
            || self.last_input.elapsed() < IDLE_TICK;
        if busy { ACTIVE_TICK } else { IDLE_TICK }
    }

    /// Inbox events first, then terminal input, then a `Tick` when due.
    ///
    /// Blocks on the terminal only while the inbox is empty, and never past
    /// the next tick.
    fn next_batch(&mut self) -> Result<Vec<UiEvent>> {
        let interval = self.tick_interval();
        let mut batch: Vec<UiEvent> =
            std::iter::from_fn(|| self.events_rx.try_recv().ok()).collect();

        let wait = if batch.is_empty() {
            interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        let mut timeout = wait;
        while event::poll(timeout)? {
            batch.push(UiEvent::Terminal(event::read()?));
            timeout = Duration::ZERO;
        }

        if self.last_tick.elapsed() >= interval {
            self.last_tick = Instant::now();
            batch.push(UiEvent::Tick);
        }
        Ok(batch)
    }

    fn apply(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::Quit => self.state.should_quit = true,
                UiEffect::Timer { kind, command } => self.schedule(kind, command),
                UiEffect::LoadDashboard { task } => {
                    let loader = Arc::clone(&self.loader);
                    self.spawn_tracked(TaskKind::DashboardLoad, task, move |cancel| {
                        handlers::dashboard_load(loader, cancel)
                    });
                }
                UiEffect::ProcessText { value } => handlers::process_text(&value),
                UiEffect::CancelTask { kind, token } => {
                    tracing::debug!(?kind, "cancelling task");
                    if let Some(token) = token {
                        token.cancel();
                    }
                }
            }
        }
    }

    /// Spawns `job` bracketed by `TaskStarted`/`TaskCompleted` inbox events.
    /// The job receives the cancel token the reducer will hold.
    fn spawn_tracked<F, Fut>(&self, kind: TaskKind, id: TaskId, job: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let token = CancellationToken::new();
        let started = TaskStarted {
            id,
            cancel: Some(token.clone()),
        };
        let _ = self.events_tx.send(UiEvent::TaskStarted { kind, started });

        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = Box::new(job(Some(token)).await);
            let completed = TaskCompleted { id, result };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn schedule(&self, kind: TimerKind, command: TimerCommand) {
        match command {
            TimerCommand::Arm {
                ticket,
                delay,
                cancel,
            } => {
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    if let Some(fired) = handlers::wait_timer(kind, ticket, delay, cancel).await {
                        let _ = tx.send(fired);
                    }
                });
            }
            TimerCommand::Cancel { .. } => command.cancel_now(),
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
