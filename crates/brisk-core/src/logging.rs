//! File logging setup.
//!
//! The TUI owns stdout/stderr while it runs, so logs always go to a file
//! under `${BRISK_HOME}/logs`. The filter comes from `BRISK_LOG` when set,
//! otherwise from `Config::log_level`.

use std::path::Path;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "BRISK_LOG";

/// Log file name inside the logs directory.
pub const LOG_FILE: &str = "brisk.log";

/// Installs the global subscriber writing to `dir/brisk.log`.
///
/// Keep the returned guard alive for the lifetime of the process; dropping it
/// flushes and stops the background writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a global subscriber is already installed.
pub fn init(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), default_level)?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}

fn build_filter(env: Option<&str>, default_level: &str) -> Result<EnvFilter> {
    let directive = env
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_level);
    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter '{directive}'"))
}
