//! Shared leaf types for TUI features.
//!
//! Contains types with no feature dependencies (tasks, timers, text helpers).
//!
//! IMPORTANT: This module must NOT import UiEvent or feature-specific state
//! to avoid circular dependencies.

pub mod task;
pub mod text;
pub mod timer;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use timer::TimerKind;
