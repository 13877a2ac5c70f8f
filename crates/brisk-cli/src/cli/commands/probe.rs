//! Headless metrics probe.

use std::time::Instant;

use anyhow::{Context, Result};
use brisk_core::metrics::{MetricsProbe, SystemCounters};
use brisk_core::schedule::TimerCommand;

/// Activates a probe, runs its deferred step and prints the snapshot.
pub async fn run(launched_at: Instant, json: bool) -> Result<()> {
    tracing::debug!(json, "running headless metrics probe");
    let counters = SystemCounters::new(launched_at);
    counters.mark_ready(Instant::now());

    let mut probe = MetricsProbe::new();
    let Some(TimerCommand::Arm { ticket, delay, .. }) = probe.activate(&counters, Instant::now())
    else {
        anyhow::bail!("metrics probe did not arm its deferred step");
    };
    // Even a zero delay yields to the runtime once before the step runs
    tokio::time::sleep(delay).await;
    tokio::task::yield_now().await;

    let snapshot = probe
        .complete(ticket, &counters, Instant::now())
        .context("metrics probe produced no snapshot")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(snapshot).context("serialize snapshot")?
        );
    } else {
        print!("{snapshot}");
    }
    Ok(())
}
