//! Bookkeeping for tasks the runtime spawns on the reducer's behalf.
//!
//! The runtime sends `TaskStarted` before the future is polled and
//! `TaskCompleted` once it resolves. Only the most recently started id of a
//! kind is live; completions carrying an older id are stale and dropped.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Hands out task ids; ids start at 1.
#[derive(Debug, Default)]
pub struct TaskSeq(u64);

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        self.0 = self.0.wrapping_add(1);
        TaskId(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Fetching the heavy dashboard module through the injected loader.
    DashboardLoad,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

#[derive(Debug, Clone)]
struct Running {
    id: TaskId,
    cancel: Option<CancellationToken>,
}

/// Live task of one kind, if any. Mutated only by the reducer.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    running: Option<Running>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn active(&self) -> Option<TaskId> {
        self.running.as_ref().map(|r| r.id)
    }

    pub fn cancel_token(&self) -> Option<&CancellationToken> {
        self.running.as_ref().and_then(|r| r.cancel.as_ref())
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.running = Some(Running {
            id: started.id,
            cancel: started.cancel.clone(),
        });
    }

    /// Clears the state if `id` is the live task. Returns whether it was.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        if self.active() != Some(id) {
            return false;
        }
        self.running = None;
        true
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub dashboard_load: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::DashboardLoad => &self.dashboard_load,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::DashboardLoad => &mut self.dashboard_load,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.dashboard_load.is_running()
    }
}
