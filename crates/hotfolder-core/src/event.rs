//! File creation events.

use std::path::{Path, PathBuf};
use std::time::Instant;

/// A file appeared in the watched folder.
///
/// Produced by the notification source and consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCreatedEvent {
    /// Absolute path of the new file
    pub full_path: PathBuf,
    /// When the event was observed
    pub timestamp: Instant,
}

impl FileCreatedEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(full_path: impl Into<PathBuf>) -> Self {
        Self {
            full_path: full_path.into(),
            timestamp: Instant::now(),
        }
    }

    /// Path of the created file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.full_path
    }
}
