use std::sync::Arc;
use std::time::Instant;

use brisk_core::metrics::{EnvironmentCounters, MetricsProbe, MetricsSnapshot};
use brisk_core::schedule::Ticket;

use crate::common::TimerKind;
use crate::effects::UiEffect;

pub struct MetricsState {
    pub probe: MetricsProbe,
    pub counters: Arc<dyn EnvironmentCounters>,
}

impl MetricsState {
    pub fn new(counters: Arc<dyn EnvironmentCounters>) -> Self {
        Self {
            probe: MetricsProbe::new(),
            counters,
        }
    }

    /// Snapshot once the deferred step has run; the panel is hidden until then.
    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        self.probe.snapshot()
    }
}

pub fn activate(metrics: &mut MetricsState, now: Instant) -> Vec<UiEffect> {
    let command = metrics.probe.activate(metrics.counters.as_ref(), now);
    UiEffect::timers(TimerKind::MetricsStep, command)
}

pub fn handle_step_fired(metrics: &mut MetricsState, ticket: Ticket, now: Instant) -> Vec<UiEffect> {
    metrics
        .probe
        .complete(ticket, metrics.counters.as_ref(), now);
    vec![]
}

pub fn dispose(metrics: &mut MetricsState) -> Vec<UiEffect> {
    UiEffect::timers(TimerKind::MetricsStep, metrics.probe.dispose())
}
