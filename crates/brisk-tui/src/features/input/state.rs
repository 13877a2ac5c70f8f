//! Text input slice state.

use std::time::Duration;

use brisk_core::debounce::DebounceGate;

use super::text_input::TextInput;

pub struct InputState {
    /// Current text value; mutated on every edit.
    pub field: TextInput,
    /// Collapses edit bursts into one processing action.
    pub gate: DebounceGate<String>,
    /// Value seen by the most recent processing action.
    pub last_processed: Option<String>,
}

impl InputState {
    pub fn new(quiet: Duration) -> Self {
        Self {
            field: TextInput::default(),
            gate: DebounceGate::new(quiet),
            last_processed: None,
        }
    }

    pub fn text(&self) -> &str {
        self.field.text()
    }

    /// Number of debounced actions that have run.
    pub fn processed_count(&self) -> u64 {
        self.gate.fire_count()
    }
}
