//! Interactive view command handler.

use std::time::Instant;

use anyhow::Result;
use brisk_core::config::Config;

pub async fn run(config: &Config, launched_at: Instant) -> Result<()> {
    brisk_tui::run_interactive(config, launched_at).await
}
