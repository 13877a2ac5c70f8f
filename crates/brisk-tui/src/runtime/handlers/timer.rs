//! Deferred callbacks.

use std::time::Duration;

use brisk_core::schedule::Ticket;
use tokio_util::sync::CancellationToken;

use crate::common::TimerKind;
use crate::events::UiEvent;

/// Waits out `delay` unless `cancel` fires first.
///
/// Returns the `TimerFired` event to deliver, or `None` when cancelled.
/// Cancellation wins if both are ready in the same poll.
pub async fn wait_timer(
    kind: TimerKind,
    ticket: Ticket,
    delay: Duration,
    cancel: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::trace!(?kind, ticket = ticket.get(), "timer cancelled");
            None
        }
        () = tokio::time::sleep(delay) => Some(UiEvent::TimerFired { kind, ticket }),
    }
}
