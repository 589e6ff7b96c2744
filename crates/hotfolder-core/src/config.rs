//! Watch configuration and directory preparation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default file pattern for project files.
pub const DEFAULT_PATTERN: &str = "*.ustx";

/// Delay between opening a file and starting playback.
pub const DEFAULT_PLAY_DELAY: Duration = Duration::from_millis(3000);

/// Name of the watched folder, relative to the working directory.
pub const DEFAULT_DIR_NAME: &str = "temp";

/// What happens when a new file arrives while a play is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayPolicy {
    /// Every opened file schedules its own play
    #[default]
    Queue,
    /// A newly opened file cancels the play still pending for the previous one
    Coalesce,
}

/// Configuration for a single watched folder.
///
/// Immutable once the watcher has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Directory to watch (non-recursive)
    pub directory: PathBuf,
    /// Glob matched against file names, e.g. `*.ustx`
    pub pattern: String,
    /// Match the pattern case-sensitively
    pub case_sensitive: bool,
    /// Grace period between opening a file and playing it
    pub play_delay: Duration,
    /// Ignore repeated creations of the same path within this window
    pub dedupe_window: Option<Duration>,
    /// Handling of overlapping pending plays
    pub play_policy: PlayPolicy,
}

impl WatchConfig {
    /// Create a configuration with default timing and policy.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            pattern: pattern.into(),
            case_sensitive: false,
            play_delay: DEFAULT_PLAY_DELAY,
            dedupe_window: None,
            play_policy: PlayPolicy::Queue,
        }
    }

    /// The default watched folder: `temp` under the current working directory.
    #[must_use]
    pub fn default_directory() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_play_delay(mut self, delay: Duration) -> Self {
        self.play_delay = delay;
        self
    }

    /// A zero window disables de-duplication.
    #[must_use]
    pub fn with_dedupe_window(mut self, window: Duration) -> Self {
        self.dedupe_window = (!window.is_zero()).then_some(window);
        self
    }

    #[must_use]
    pub fn with_play_policy(mut self, policy: PlayPolicy) -> Self {
        self.play_policy = policy;
        self
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new(Self::default_directory(), DEFAULT_PATTERN)
    }
}

/// Make sure `path` exists and is a readable directory, creating it if absent.
///
/// # Errors
/// Returns [`Error::DirectoryUnavailable`] if the directory cannot be created
/// or read.
pub fn prepare_directory(path: &Path) -> Result<()> {
    let unavailable = |source: std::io::Error| Error::DirectoryUnavailable {
        path: path.to_path_buf(),
        source,
    };

    if !path.exists() {
        std::fs::create_dir_all(path).map_err(unavailable)?;
        info!(path = %path.display(), "Created watch directory");
    }

    let metadata = std::fs::metadata(path).map_err(unavailable)?;
    if !metadata.is_dir() {
        return Err(unavailable(std::io::Error::other("not a directory")));
    }

    // Listing proves we can actually watch it
    std::fs::read_dir(path).map_err(unavailable)?;
    debug!(path = %path.display(), "Watch directory ready");

    Ok(())
}
