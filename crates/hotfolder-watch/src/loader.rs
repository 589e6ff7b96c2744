//! Turns file creation events into UI commands.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use hotfolder_core::{ExtensionFilter, FileCreatedEvent, PlayPolicy, WatchConfig};
use hotfolder_ui::{OpenRequest, UiCommand, UiHandle};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::error::WatchResult;

/// Outcome of handling one creation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// An `OpenFile` command was posted to the UI context
    Posted,
    /// The file name did not match the pattern
    Filtered,
    /// The same path was seen within the de-duplication window
    Duplicate,
    /// The watcher has been stopped
    Stopped,
    /// The UI context is gone; the event was dropped
    UiClosed,
}

/// Dispatches matching creation events to the UI context.
///
/// Events are handled in the order they are passed in; each matching event
/// results in exactly one `OpenFile` command.
pub struct AutoLoader {
    filter: ExtensionFilter,
    play_delay: Duration,
    play_policy: PlayPolicy,
    dedupe_window: Option<Duration>,
    recent: Mutex<HashMap<PathBuf, Instant>>,
    ui: UiHandle,
    watch_token: CancellationToken,
}

impl std::fmt::Debug for AutoLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoLoader")
            .field("pattern", &self.filter.pattern())
            .field("play_delay", &self.play_delay)
            .field("play_policy", &self.play_policy)
            .field("dedupe_window", &self.dedupe_window)
            .finish_non_exhaustive()
    }
}

impl AutoLoader {
    /// Create a loader posting to `ui`.
    ///
    /// # Errors
    /// Returns an error if the configured pattern is invalid.
    pub fn new(config: &WatchConfig, ui: UiHandle) -> WatchResult<Self> {
        Ok(Self {
            filter: ExtensionFilter::new(&config.pattern, config.case_sensitive)?,
            play_delay: config.play_delay,
            play_policy: config.play_policy,
            dedupe_window: config.dedupe_window,
            recent: Mutex::new(HashMap::new()),
            ui,
            watch_token: CancellationToken::new(),
        })
    }

    /// Handle a single creation event.
    pub fn handle_event(&self, event: FileCreatedEvent) -> Dispatch {
        if self.watch_token.is_cancelled() {
            return Dispatch::Stopped;
        }

        if !self.filter.matches(event.path()) {
            trace!(path = %event.path().display(), "Ignoring file not matching pattern");
            return Dispatch::Filtered;
        }

        if self.is_duplicate(&event) {
            debug!(path = %event.path().display(), "Ignoring repeated creation");
            return Dispatch::Duplicate;
        }

        info!(path = %event.path().display(), "Project file created");
        let path = event.full_path.clone();
        let request = OpenRequest {
            event,
            play_delay: self.play_delay,
            play_policy: self.play_policy,
            watch_token: self.watch_token.clone(),
        };

        match self.ui.post(UiCommand::OpenFile(request)) {
            Ok(()) => Dispatch::Posted,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Dropping created file");
                Dispatch::UiClosed
            }
        }
    }

    /// Stop dispatching and cancel every play scheduled from this loader.
    pub fn stop(&self) {
        self.watch_token.cancel();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.watch_token.is_cancelled()
    }

    /// First sighting of a path wins until the window has passed.
    fn is_duplicate(&self, event: &FileCreatedEvent) -> bool {
        let Some(window) = self.dedupe_window else {
            return false;
        };

        let mut recent = self.recent.lock();
        recent.retain(|_, seen| event.timestamp.saturating_duration_since(*seen) < window);

        if recent.contains_key(&event.full_path) {
            return true;
        }
        recent.insert(event.full_path.clone(), event.timestamp);
        false
    }
}
