//! CLI entry and dispatch.

use std::time::Instant;

use anyhow::{Context, Result};
use brisk_core::config;
use brisk_core::logging::{self, WorkerGuard};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "brisk")]
#[command(version)]
#[command(about = "Terminal performance showcase: debouncing, memoization and lazy loading")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,
}

/// Flags that take precedence over `config.toml`.
#[derive(clap::Args, Clone, Copy)]
struct Overrides {
    /// Quiet interval of the debounced text field, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    debounce_ms: Option<u64>,

    /// Simulated latency of the lazy dashboard loader, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    load_ms: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut config::Config) {
        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        if let Some(ms) = self.load_ms {
            config.dashboard_load_ms = ms;
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Capture one performance metrics snapshot without the interactive view
    Probe {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the default configuration as TOML
    Generate,
}

pub fn run() -> Result<()> {
    let launched_at = Instant::now();
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, launched_at).await })
}

async fn dispatch(cli: Cli, launched_at: Instant) -> Result<()> {
    let Cli { command, overrides } = cli;

    let Some(command) = command else {
        let config = load_config(overrides)?;
        let _log_guard = init_logging(&config)?;
        return commands::run::run(&config, launched_at).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
        Commands::Probe { json } => {
            let config = load_config(overrides)?;
            let _log_guard = init_logging(&config)?;
            commands::probe::run(launched_at, json).await
        }
    }
}

fn load_config(overrides: Overrides) -> Result<config::Config> {
    let mut config = config::Config::load().context("load config")?;
    overrides.apply(&mut config);
    Ok(config)
}

/// The returned guard flushes buffered log lines when dropped.
fn init_logging(config: &config::Config) -> Result<WorkerGuard> {
    logging::init(&config::paths::logs_dir(), &config.log_level).context("initialize logging")
}
