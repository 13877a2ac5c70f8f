//! Configuration management for Brisk.
//!
//! Loads configuration from ${BRISK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Brisk configuration and log directories.
    //!
    //! BRISK_HOME resolution order:
    //! 1. BRISK_HOME environment variable (if set)
    //! 2. ~/.config/brisk (default)
    //! 3. ./.brisk when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the Brisk home directory.
    pub fn brisk_home() -> PathBuf {
        if let Ok(home) = std::env::var("BRISK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".brisk"),
            |h| h.join(".config").join("brisk"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        brisk_home().join("config.toml")
    }

    /// Returns the directory that holds log files.
    pub fn logs_dir() -> PathBuf {
        brisk_home().join("logs")
    }
}

/// Main configuration structure.
///
/// All durations are expressed in milliseconds so the file stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quiet interval before a burst of text edits is processed.
    pub debounce_ms: u64,

    /// Artificial delay before the heavy dashboard considers its data ready.
    pub dashboard_populate_ms: u64,

    /// Simulated latency of the lazy dashboard loader.
    pub dashboard_load_ms: u64,

    /// Length of the random sequence fed to the expensive calculation.
    pub large_data_len: usize,

    /// Upper bound (exclusive) of the range summed for every expensive item.
    pub expensive_range: u64,

    /// Number of expensive results rendered.
    pub expensive_preview: usize,

    /// Number of generated list labels.
    pub list_len: usize,

    /// Number of list rows rendered before the "more items" hint.
    pub list_preview: usize,

    /// Number of points in the dashboard chart.
    pub chart_points: usize,

    /// Default log filter (overridden by BRISK_LOG).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            dashboard_populate_ms: Self::DEFAULT_POPULATE_MS,
            dashboard_load_ms: Self::DEFAULT_LOAD_MS,
            large_data_len: 1000,
            expensive_range: 100,
            expensive_preview: 5,
            list_len: 100,
            list_preview: 20,
            chart_points: 50,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    const DEFAULT_DEBOUNCE_MS: u64 = 300;
    const DEFAULT_POPULATE_MS: u64 = 500;
    const DEFAULT_LOAD_MS: u64 = 250;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Renders the default configuration as TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn generate() -> Result<String> {
        toml::to_string(&Config::default()).context("Failed to serialize default config to TOML")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn populate_delay(&self) -> Duration {
        Duration::from_millis(self.dashboard_populate_ms)
    }

    pub fn load_latency(&self) -> Duration {
        Duration::from_millis(self.dashboard_load_ms)
    }
}

fn default_config_template() -> &'static str {
    include_str!("default_config.toml")
}
