//! Effect handlers for the TUI runtime.
//!
//! These functions perform I/O, waiting and logging for effects returned by
//! the reducer. They do NOT mutate state; async handlers return the `UiEvent`
//! the runtime forwards to its inbox.

pub mod dashboard;
pub mod text;
pub mod timer;

pub use dashboard::*;
pub use text::*;
pub use timer::*;
