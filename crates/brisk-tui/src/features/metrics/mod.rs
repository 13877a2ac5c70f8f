//! Performance metrics panel.
//!
//! The probe activates on the first frame, reads the synchronous counters
//! and finishes its render-time measurement one event-loop turn later.

mod state;

pub use state::{MetricsState, activate, dispose, handle_step_fired};
