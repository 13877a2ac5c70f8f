//! Debounced text input slice.

mod state;
mod text_input;
mod update;

pub use state::InputState;
pub use text_input::{EditOutcome, TextInput};
pub use update::{dispose, handle_debounce_fired, handle_key, handle_paste};
