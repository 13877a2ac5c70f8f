//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TimerKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus};
use crate::{dashboard, input, metrics};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    update_at(app, event, Instant::now())
}

/// Reducer with an explicit clock, used by `update` and by tests.
pub fn update_at(app: &mut AppState, event: UiEvent, now: Instant) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            // Advance spinner animation
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { .. } => handle_frame(app, now),
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event, now),
        UiEvent::TimerFired { kind, ticket } => match kind {
            TimerKind::Debounce => input::handle_debounce_fired(&mut app.input, ticket),
            TimerKind::DashboardPopulate => {
                dashboard::handle_populate_fired(&mut app.dashboard, ticket)
            }
            TimerKind::MetricsStep => metrics::handle_step_fired(&mut app.metrics, ticket, now),
        },
        UiEvent::DashboardLoaded(result) => {
            if app.disposed {
                return vec![];
            }
            dashboard::handle_loaded(&mut app.dashboard, result, now)
        }
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            // A completion for a superseded task id is dropped
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update_at(app, *completed.result, now)
            } else {
                vec![]
            }
        }
    }
}

/// Brings memoized data up to date and mounts the view on the first frame.
fn handle_frame(app: &mut AppState, now: Instant) -> Vec<UiEffect> {
    if app.disposed {
        return vec![];
    }
    app.showcase.refresh();
    if app.mounted {
        return vec![];
    }
    app.mounted = true;
    tracing::debug!("view mounted");
    metrics::activate(&mut app.metrics, now)
}

fn handle_terminal_event(app: &mut AppState, event: Event, now: Instant) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key, now),
        Event::Paste(text) if app.focus == Focus::Text => {
            input::handle_paste(&mut app.input, &text, now)
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Vec<UiEffect> {
    if matches!(key.kind, KeyEventKind::Release) {
        return vec![];
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return quit(app),
        KeyCode::Char('c') if ctrl => return quit(app),
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return vec![];
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return vec![];
        }
        _ => {}
    }

    let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) && !ctrl;
    match app.focus {
        Focus::Text => input::handle_key(&mut app.input, key, now),
        Focus::Counter if activate || key.code == KeyCode::Char('+') => {
            app.counter = app.counter.saturating_add(1);
            vec![]
        }
        Focus::DashboardToggle if activate => {
            dashboard::toggle(&mut app.dashboard, &mut app.task_seq, now)
        }
        Focus::Counter | Focus::DashboardToggle => vec![],
    }
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = app.dispose();
    effects.push(UiEffect::Quit);
    effects
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use brisk_core::config::Config;
    use brisk_core::debounce::GatePhase;
    use brisk_core::loader::DashboardModule;
    use brisk_core::metrics::EnvironmentCounters;
    use brisk_core::schedule::{Ticket, TimerCommand};
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};

    struct NoCounters;

    impl EnvironmentCounters for NoCounters {
        fn payload_size_bytes(&self) -> Option<u64> {
            None
        }
        fn load_time(&self) -> Option<Duration> {
            None
        }
        fn memory_usage_bytes(&self) -> Option<u64> {
            None
        }
    }

    fn app() -> AppState {
        AppState::new(Config::default(), Arc::new(NoCounters))
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn frame() -> UiEvent {
        UiEvent::Frame {
            width: 80,
            height: 24,
        }
    }

    fn armed(effects: &[UiEffect], want: TimerKind) -> Vec<Ticket> {
        effects
            .iter()
            .filter_map(|e| match e {
                UiEffect::Timer {
                    kind,
                    command: TimerCommand::Arm { ticket, .. },
                } if *kind == want => Some(*ticket),
                _ => None,
            })
            .collect()
    }

    fn cancelled(effects: &[UiEffect]) -> Vec<Ticket> {
        effects
            .iter()
            .filter_map(|e| match e {
                UiEffect::Timer {
                    command: TimerCommand::Cancel { ticket, .. },
                    ..
                } => Some(*ticket),
                _ => None,
            })
            .collect()
    }

    fn fire(app: &mut AppState, kind: TimerKind, ticket: Ticket, now: Instant) -> Vec<UiEffect> {
        update_at(app, UiEvent::TimerFired { kind, ticket }, now)
    }

    /// Runs the dashboard load task to completion through the task lifecycle.
    fn complete_load(app: &mut AppState, task: TaskId, now: Instant) -> Vec<UiEffect> {
        let started = TaskStarted {
            id: task,
            cancel: Some(CancellationToken::new()),
        };
        update_at(
            app,
            UiEvent::TaskStarted {
                kind: TaskKind::DashboardLoad,
                started,
            },
            now,
        );
        let module = DashboardModule::new(50, Duration::from_millis(500));
        update_at(
            app,
            UiEvent::TaskCompleted {
                kind: TaskKind::DashboardLoad,
                completed: TaskCompleted {
                    id: task,
                    result: Box::new(UiEvent::DashboardLoaded(Ok(module))),
                },
            },
            now,
        )
    }

    #[test]
    fn test_counter_presses_do_not_recompute_derived_data() {
        let mut app = app();
        let now = Instant::now();
        update_at(&mut app, frame(), now);
        let computations = app.showcase.computations();
        let data = Arc::clone(app.showcase.large_data().unwrap());

        for _ in 0..3 {
            assert!(update_at(&mut app, key(KeyCode::Enter), now).is_empty());
            update_at(&mut app, frame(), now);
        }

        assert_eq!(app.counter, 3);
        assert_eq!(app.showcase.computations(), computations);
        assert!(Arc::ptr_eq(&data, app.showcase.large_data().unwrap()));
    }

    #[test]
    fn test_typing_burst_fires_once_with_last_value() {
        let mut app = app();
        let t0 = Instant::now();
        update_at(&mut app, key(KeyCode::Tab), t0);
        assert_eq!(app.focus, Focus::Text);

        let mut tickets = Vec::new();
        for c in ['a', 'b', 'c'] {
            tickets.extend(armed(
                &update_at(&mut app, key(KeyCode::Char(c)), t0),
                TimerKind::Debounce,
            ));
        }
        let t1 = t0 + Duration::from_millis(40);
        let effects = update_at(&mut app, key(KeyCode::Char('d')), t1);
        assert_eq!(cancelled(&effects), vec![tickets[2]]);
        let last = armed(&effects, TimerKind::Debounce)[0];
        assert_eq!(
            app.input.gate.phase(),
            GatePhase::Pending {
                deadline: t1 + Duration::from_millis(300)
            }
        );

        // Superseded tickets that still get delivered are dropped.
        for stale in &tickets {
            assert!(fire(&mut app, TimerKind::Debounce, *stale, t1).is_empty());
        }
        let effects = fire(&mut app, TimerKind::Debounce, last, t1 + Duration::from_millis(300));
        assert!(matches!(&effects[..], [UiEffect::ProcessText { value }] if value == "abcd"));
        assert_eq!(app.input.processed_count(), 1);
        assert_eq!(app.status().debounce, "idle");
    }

    #[test]
    fn test_keys_only_edit_when_text_is_focused() {
        let mut app = app();
        let now = Instant::now();
        update_at(&mut app, key(KeyCode::Char('x')), now);
        assert!(app.input.text().is_empty());

        update_at(&mut app, key(KeyCode::BackTab), now);
        assert_eq!(app.focus, Focus::DashboardToggle);
        update_at(&mut app, key(KeyCode::BackTab), now);
        assert_eq!(app.focus, Focus::Text);
        update_at(&mut app, key(KeyCode::Char(' ')), now);
        assert_eq!(app.input.text(), " ");
        assert_eq!(app.counter, 0);
    }

    #[test]
    fn test_dashboard_remount_ignores_stale_population() {
        let mut app = app();
        let t0 = Instant::now();
        app.focus = Focus::DashboardToggle;

        let effects = update_at(&mut app, key(KeyCode::Enter), t0);
        let [UiEffect::LoadDashboard { task }] = &effects[..] else {
            panic!("expected a load request");
        };
        let effects = complete_load(&mut app, *task, t0);
        let first = armed(&effects, TimerKind::DashboardPopulate)[0];

        let t1 = t0 + Duration::from_millis(100);
        let effects = update_at(&mut app, key(KeyCode::Enter), t1);
        assert_eq!(cancelled(&effects), vec![first]);
        assert!(app.dashboard.view.is_none());

        let t2 = t0 + Duration::from_millis(200);
        let effects = update_at(&mut app, key(KeyCode::Enter), t2);
        assert!(!effects.iter().any(|e| matches!(e, UiEffect::LoadDashboard { .. })));
        let second = armed(&effects, TimerKind::DashboardPopulate)[0];
        assert_ne!(first, second);

        fire(&mut app, TimerKind::DashboardPopulate, first, t0 + Duration::from_millis(500));
        assert!(app.dashboard.view.as_ref().unwrap().chart().is_none());

        fire(&mut app, TimerKind::DashboardPopulate, second, t2 + Duration::from_millis(500));
        assert!(app.dashboard.view.as_ref().unwrap().chart().is_some());
        assert_eq!(app.dashboard.mounts, 2);
    }

    #[test]
    fn test_stale_task_completion_is_ignored() {
        let mut app = app();
        let now = Instant::now();
        app.focus = Focus::DashboardToggle;
        let effects = update_at(&mut app, key(KeyCode::Enter), now);
        let [UiEffect::LoadDashboard { task }] = &effects[..] else {
            panic!("expected a load request");
        };
        let other = TaskId(task.0 + 100);

        let effects = update_at(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::DashboardLoad,
                completed: TaskCompleted {
                    id: other,
                    result: Box::new(UiEvent::DashboardLoaded(Err("boom".into()))),
                },
            },
            now,
        );
        assert!(effects.is_empty());
        assert!(app.dashboard.is_loading());
    }

    #[test]
    fn test_first_frame_activates_metrics_once() {
        let mut app = app();
        let now = Instant::now();
        let effects = update_at(&mut app, frame(), now);
        let step = armed(&effects, TimerKind::MetricsStep);
        assert_eq!(step.len(), 1);
        assert!(update_at(&mut app, frame(), now).is_empty());
        assert!(app.metrics.snapshot().is_none());

        fire(&mut app, TimerKind::MetricsStep, step[0], now + Duration::from_millis(2));
        assert!(app.metrics.snapshot().is_some());
    }

    #[test]
    fn test_quit_cancels_every_pending_timer() {
        let mut app = app();
        let now = Instant::now();
        let mut pending = armed(&update_at(&mut app, frame(), now), TimerKind::MetricsStep);

        app.focus = Focus::Text;
        let debounce = armed(
            &update_at(&mut app, key(KeyCode::Char('q')), now),
            TimerKind::Debounce,
        )[0];
        pending.push(debounce);

        app.focus = Focus::DashboardToggle;
        let effects = update_at(&mut app, key(KeyCode::Enter), now);
        let [UiEffect::LoadDashboard { task }] = &effects[..] else {
            panic!("expected a load request");
        };
        pending.extend(armed(
            &complete_load(&mut app, *task, now),
            TimerKind::DashboardPopulate,
        ));
        assert_eq!(pending.len(), 3);

        let effects = update_at(&mut app, key(KeyCode::Esc), now);
        let mut cancelled = cancelled(&effects);
        cancelled.sort();
        pending.sort();
        assert_eq!(cancelled, pending);
        assert!(matches!(effects.last(), Some(UiEffect::Quit)));

        // Late deliveries after teardown are no-ops.
        assert!(fire(&mut app, TimerKind::Debounce, debounce, now).is_empty());
        assert_eq!(app.input.processed_count(), 0);
        assert!(app.metrics.snapshot().is_none());
        assert_eq!(update_at(&mut app, key(KeyCode::Esc), now).len(), 1);
    }

    #[test]
    fn test_ctrl_c_quits_from_text_field() {
        let mut app = app();
        app.focus = Focus::Text;
        let effects = update_at(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
            Instant::now(),
        );
        assert!(matches!(&effects[..], [UiEffect::Quit]));
        assert!(app.input.text().is_empty());
    }
}
