//! Lazily loaded heavy dashboard.
//!
//! - `state.rs`: module lifecycle and the mounted view
//! - `update.rs`: toggle, loader results and population timers

mod state;
mod update;

pub use state::{DashboardState, DashboardView, ModuleState};
pub use update::{dispose, handle_loaded, handle_populate_fired, toggle};
