//! One-shot performance metrics probe.
//!
//! `activate` reads the synchronous counters and arms a zero-delay deferred
//! step; `complete` measures how long that step took to come around and
//! freezes the snapshot. Missing counters degrade to `Metric::Unavailable`,
//! counters that have not been populated yet count as missing.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use crate::schedule::{DeferredSlot, Ticket, TimerCommand};

/// A measured value or the "unavailable" sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric<T> {
    Value(T),
    Unavailable,
}

impl<T> Metric<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Value(_))
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Metric::Unavailable, Metric::Value)
    }
}

impl<T: Serialize> Serialize for Metric<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Value(v) => v.serialize(serializer),
            Metric::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

/// Immutable record produced once per probe activation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Approximate size of the shipped payload, in bytes.
    pub payload_size_bytes: Metric<u64>,
    /// Launch to ready, rounded to whole milliseconds.
    pub load_time_ms: Metric<u64>,
    /// Activation to deferred step, rounded to two decimals.
    pub render_time_ms: Metric<f64>,
    /// Resident memory, rounded to whole megabytes.
    pub memory_usage_mb: Metric<u64>,
}

impl MetricsSnapshot {
    /// Display rows as `(label, value)` pairs, `N/A` for the sentinel.
    pub fn rows(&self) -> [(&'static str, String); 4] {
        [
            ("Payload Size", show(&self.payload_size_bytes, |b| format_bytes(*b))),
            ("Load Time", show(&self.load_time_ms, |ms| format!("{ms}ms"))),
            ("Render Time", show(&self.render_time_ms, |ms| format!("{ms}ms"))),
            ("Memory Usage", show(&self.memory_usage_mb, |mb| format!("{mb}MB"))),
        ]
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.rows() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

fn show<T>(metric: &Metric<T>, render: impl Fn(&T) -> String) -> String {
    metric.value().map_or_else(|| "N/A".to_string(), render)
}

fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1}MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1}kB", b / KB)
    } else {
        format!("{bytes}B")
    }
}

/// Environment-provided counters. Every reading is optional.
pub trait EnvironmentCounters: Send + Sync {
    fn payload_size_bytes(&self) -> Option<u64>;
    fn load_time(&self) -> Option<Duration>;
    fn memory_usage_bytes(&self) -> Option<u64>;
}

/// Counters backed by the running process.
///
/// - payload: size of the current executable
/// - load time: launch instant to the `mark_ready` call
/// - memory: resident set size via `sysinfo`
#[derive(Debug)]
pub struct SystemCounters {
    launched_at: Instant,
    ready_at: Mutex<Option<Instant>>,
}

impl SystemCounters {
    pub fn new(launched_at: Instant) -> Self {
        Self {
            launched_at,
            ready_at: Mutex::new(None),
        }
    }

    /// Marks the UI as ready; the first call wins.
    pub fn mark_ready(&self, at: Instant) {
        if let Ok(mut ready) = self.ready_at.lock() {
            ready.get_or_insert(at);
        }
    }
}

impl EnvironmentCounters for SystemCounters {
    fn payload_size_bytes(&self) -> Option<u64> {
        let exe = std::env::current_exe().ok()?;
        std::fs::metadata(exe).ok().map(|m| m.len())
    }

    fn load_time(&self) -> Option<Duration> {
        let ready = (*self.ready_at.lock().ok()?)?;
        ready.checked_duration_since(self.launched_at)
    }

    fn memory_usage_bytes(&self) -> Option<u64> {
        let pid = sysinfo::get_current_pid().ok()?;
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(pid).map(sysinfo::Process::memory)
    }
}

/// Readings taken synchronously at activation.
#[derive(Debug, Clone, Copy)]
struct Activation {
    started_at: Instant,
    payload_size_bytes: Metric<u64>,
    load_time_ms: Metric<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePhase {
    Inactive,
    Measuring,
    Done,
    Disposed,
}

/// Single-shot probe. Produces at most one snapshot per instance.
#[derive(Debug, Default)]
pub struct MetricsProbe {
    step: DeferredSlot<Activation>,
    snapshot: Option<MetricsSnapshot>,
    activated: bool,
    disposed: bool,
}

impl MetricsProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the synchronous counters and arms the deferred render step.
    /// Only the first call does anything.
    pub fn activate(
        &mut self,
        counters: &dyn EnvironmentCounters,
        now: Instant,
    ) -> Option<TimerCommand> {
        if self.activated || self.disposed {
            return None;
        }
        self.activated = true;

        let activation = Activation {
            started_at: now,
            payload_size_bytes: counters.payload_size_bytes().into(),
            load_time_ms: counters
                .load_time()
                .map(|d| (d.as_secs_f64() * 1000.0).round() as u64)
                .into(),
        };
        tracing::debug!(?activation, "metrics probe activated");
        self.step
            .arm(now, Duration::ZERO, activation)
            .into_iter()
            .next()
    }

    /// Runs the deferred step for `ticket` and freezes the snapshot.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        counters: &dyn EnvironmentCounters,
        now: Instant,
    ) -> Option<&MetricsSnapshot> {
        let activation = self.step.fire(ticket)?;
        let render = now.saturating_duration_since(activation.started_at);
        let render_ms = (render.as_secs_f64() * 1000.0 * 100.0).round() / 100.0;
        let memory_mb = counters
            .memory_usage_bytes()
            .map(|b| (b as f64 / 1024.0 / 1024.0).round() as u64);

        let snapshot = MetricsSnapshot {
            payload_size_bytes: activation.payload_size_bytes,
            load_time_ms: activation.load_time_ms,
            render_time_ms: Metric::Value(render_ms),
            memory_usage_mb: memory_mb.into(),
        };
        tracing::info!(%snapshot, "metrics snapshot captured");
        self.snapshot = Some(snapshot);
        self.snapshot.as_ref()
    }

    /// Cancels the deferred step if it has not run yet.
    pub fn dispose(&mut self) -> Option<TimerCommand> {
        self.disposed = true;
        self.step.cancel()
    }

    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn phase(&self) -> ProbePhase {
        if self.snapshot.is_some() {
            ProbePhase::Done
        } else if self.disposed {
            ProbePhase::Disposed
        } else if self.activated {
            ProbePhase::Measuring
        } else {
            ProbePhase::Inactive
        }
    }
}
