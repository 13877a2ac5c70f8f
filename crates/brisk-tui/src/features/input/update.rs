//! Text input reducer.

use std::time::Instant;

use brisk_core::schedule::Ticket;
use crossterm::event::KeyEvent;

use super::state::InputState;
use super::text_input::EditOutcome;
use crate::common::TimerKind;
use crate::effects::UiEffect;

/// Applies an editing key; a text change re-arms the debounce gate.
pub fn handle_key(input: &mut InputState, key: KeyEvent, now: Instant) -> Vec<UiEffect> {
    match input.field.input(key) {
        EditOutcome::Changed => notify(input, now),
        EditOutcome::Moved | EditOutcome::Ignored => vec![],
    }
}

/// Inserts pasted text as a single edit.
pub fn handle_paste(input: &mut InputState, text: &str, now: Instant) -> Vec<UiEffect> {
    if input.field.insert_str(text) {
        notify(input, now)
    } else {
        vec![]
    }
}

/// Routes a fired debounce ticket. Stale tickets produce nothing.
pub fn handle_debounce_fired(input: &mut InputState, ticket: Ticket) -> Vec<UiEffect> {
    let Some(value) = input.gate.fire(ticket) else {
        return vec![];
    };
    input.last_processed = Some(value.clone());
    vec![UiEffect::ProcessText { value }]
}

/// Cancels the pending action for teardown.
pub fn dispose(input: &mut InputState) -> Vec<UiEffect> {
    UiEffect::timers(TimerKind::Debounce, input.gate.dispose())
}

fn notify(input: &mut InputState, now: Instant) -> Vec<UiEffect> {
    let value = input.field.text().to_string();
    UiEffect::timers(TimerKind::Debounce, input.gate.notify(value, now))
}
