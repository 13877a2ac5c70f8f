//! Status line feature slice.
//!
//! Shows the focused control, the debounce gate phase, how many debounced
//! actions have run and a smoothed FPS figure.
//!
//! - `state.rs`: StatusLineAccumulator (mutable counters) and StatusLine (immutable snapshot)
//! - `render.rs`: Status line rendering

mod render;
mod state;

pub use render::render_status_line;
pub use state::{StatusLine, StatusLineAccumulator};
