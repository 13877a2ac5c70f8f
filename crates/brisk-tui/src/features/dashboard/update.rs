//! Heavy dashboard reducer.

use std::time::Instant;

use brisk_core::loader::DashboardModule;
use brisk_core::schedule::Ticket;

use super::state::{DashboardState, DashboardView, ModuleState};
use crate::common::{TaskKind, TaskSeq, Tasks, TimerKind};
use crate::effects::UiEffect;

/// Flips visibility, mounting or disposing the view.
pub fn toggle(state: &mut DashboardState, seq: &mut TaskSeq, now: Instant) -> Vec<UiEffect> {
    state.visible = !state.visible;
    tracing::debug!(visible = state.visible, "dashboard toggled");
    if state.visible {
        activate(state, seq, now)
    } else {
        unmount(state)
    }
}

fn activate(state: &mut DashboardState, seq: &mut TaskSeq, now: Instant) -> Vec<UiEffect> {
    match &state.module {
        ModuleState::Loaded(module) => {
            let module = module.clone();
            mount(state, module, now)
        }
        // A fetch is already in flight; its completion mounts the view.
        ModuleState::Loading { .. } => vec![],
        ModuleState::NotLoaded | ModuleState::Failed { .. } => {
            let task = seq.next_id();
            state.module = ModuleState::Loading { task };
            vec![UiEffect::LoadDashboard { task }]
        }
    }
}

fn mount(state: &mut DashboardState, module: DashboardModule, now: Instant) -> Vec<UiEffect> {
    let mut effects = unmount(state);
    let (view, commands) = DashboardView::mount(module, now);
    state.view = Some(view);
    state.mounts += 1;
    effects.extend(UiEffect::timers(TimerKind::DashboardPopulate, commands));
    effects
}

fn unmount(state: &mut DashboardState) -> Vec<UiEffect> {
    state
        .view
        .take()
        .and_then(|mut view| view.dispose())
        .map(|command| UiEffect::timers(TimerKind::DashboardPopulate, [command]))
        .unwrap_or_default()
}

/// Handles the loader result. The module is kept even if the dashboard was
/// hidden in the meantime; it is only mounted while visible.
pub fn handle_loaded(
    state: &mut DashboardState,
    result: Result<DashboardModule, String>,
    now: Instant,
) -> Vec<UiEffect> {
    match result {
        Ok(module) => {
            tracing::info!(points = module.chart_points, "dashboard module loaded");
            state.module = ModuleState::Loaded(module.clone());
            if state.visible {
                mount(state, module, now)
            } else {
                vec![]
            }
        }
        Err(error) => {
            tracing::warn!(%error, "dashboard module failed to load");
            state.module = ModuleState::Failed { error };
            vec![]
        }
    }
}

/// Routes a fired population ticket to the mounted view.
pub fn handle_populate_fired(state: &mut DashboardState, ticket: Ticket) -> Vec<UiEffect> {
    let populated = state.view.as_mut().is_some_and(|view| view.populate(ticket));
    if populated {
        tracing::debug!("dashboard chart populated");
    } else {
        tracing::trace!(ticket = ticket.get(), "stale dashboard population ignored");
    }
    vec![]
}

/// Cancels everything the dashboard owns for teardown.
pub fn dispose(state: &mut DashboardState, tasks: &Tasks) -> Vec<UiEffect> {
    let mut effects = unmount(state);
    if state.is_loading() {
        effects.push(UiEffect::CancelTask {
            kind: TaskKind::DashboardLoad,
            token: tasks.state(TaskKind::DashboardLoad).cancel_token().cloned(),
        });
    }
    effects
}
