//! Watcher error types.

use thiserror::Error;

/// Watcher error type.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Core(#[from] hotfolder_core::Error),

    #[error("File notification error: {0}")]
    Notify(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for watcher operations.
pub type WatchResult<T> = Result<T, WatchError>;
