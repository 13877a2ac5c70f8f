//! Full-screen performance showcase for Brisk.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod view;

use std::io::{IsTerminal, Write, stderr};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use brisk_core::config::Config;
use brisk_core::loader::{DashboardModule, SimulatedLoader};
use brisk_core::metrics::SystemCounters;
pub use features::{dashboard, input, metrics, showcase, statusline};
pub use runtime::TuiRuntime;

/// Runs the interactive view until the user quits.
///
/// `launched_at` is the process start mark used for the load-time metric.
pub async fn run_interactive(config: &Config, launched_at: Instant) -> Result<()> {
    // The view renders to the terminal
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `brisk probe` for non-interactive metrics."
        );
    }

    let counters = Arc::new(SystemCounters::new(launched_at));
    let module = DashboardModule::new(config.chart_points, config.populate_delay());
    let loader = Arc::new(SimulatedLoader::new(config.load_latency(), module));

    let mut runtime = TuiRuntime::new(
        config.clone(),
        Arc::<SystemCounters>::clone(&counters),
        loader,
    )?;
    counters.mark_ready(Instant::now());
    tracing::info!(
        debounce_ms = config.debounce_ms,
        load_ms = config.dashboard_load_ms,
        "interactive view started"
    );

    runtime.run()?;
    let processed = runtime.state.input.processed_count();
    let counter = runtime.state.counter;
    drop(runtime);

    // Terminal is restored once the runtime is dropped
    writeln!(
        stderr(),
        "Goodbye! ({counter} clicks, {processed} debounced actions)"
    )?;

    Ok(())
}
