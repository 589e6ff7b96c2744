//! Daemon configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use hotfolder_core::{DEFAULT_PATTERN, DEFAULT_PLAY_DELAY, PlayPolicy, WatchConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Daemon settings
    #[serde(default)]
    pub daemon: DaemonConfig,
    /// Watched folder settings
    #[serde(default)]
    pub watch: WatchSection,
}

/// Daemon-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Watched folder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSection {
    /// Folder to watch (defaults to `temp` under the working directory)
    pub directory: Option<PathBuf>,
    /// File name pattern
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Match the pattern case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,
    /// Delay between opening and playing, in milliseconds
    #[serde(default = "default_play_delay_ms")]
    pub play_delay_ms: u64,
    /// Repeat-creation suppression window in milliseconds, 0 to disable
    #[serde(default)]
    pub dedupe_window_ms: u64,
    /// Handling of a play still pending when the next file arrives
    #[serde(default)]
    pub play_policy: PlayPolicy,
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            directory: None,
            pattern: default_pattern(),
            case_sensitive: false,
            play_delay_ms: default_play_delay_ms(),
            dedupe_window_ms: 0,
            play_policy: PlayPolicy::default(),
        }
    }
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_play_delay_ms() -> u64 {
    u64::try_from(DEFAULT_PLAY_DELAY.as_millis()).unwrap_or(3000)
}

impl WatchSection {
    /// Build the watcher configuration.
    #[must_use]
    pub fn to_watch_config(&self) -> WatchConfig {
        let directory = self
            .directory
            .clone()
            .unwrap_or_else(WatchConfig::default_directory);

        WatchConfig::new(directory, self.pattern.clone())
            .with_case_sensitive(self.case_sensitive)
            .with_play_delay(Duration::from_millis(self.play_delay_ms))
            .with_dedupe_window(Duration::from_millis(self.dedupe_window_ms))
            .with_play_policy(self.play_policy)
    }
}

/// Load configuration from file or defaults.
pub fn load_config() -> Result<Config> {
    let config_path = config_path()?;

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {config_path:?}"))?;
        parse_config(&content)
            .with_context(|| format!("Failed to parse config file: {config_path:?}"))
    } else {
        info!(?config_path, "Config file not found, using defaults");
        Ok(Config::default())
    }
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Get the configuration file path.
fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "hotfolder", "Hotfolder")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}
