//! Feature slices for the TUI (state/update/render per slice).

pub mod dashboard;
pub mod input;
pub mod metrics;
pub mod showcase;
pub mod statusline;
