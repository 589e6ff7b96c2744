//! Error types for Hotfolder core.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for Hotfolder operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Watch directory unavailable: {path:?}: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("No main window available")]
    CollaboratorUnavailable,

    #[error("Failed to load {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Playback failed: {0}")]
    Playback(String),
}

/// Result type alias for Hotfolder core operations.
pub type Result<T> = std::result::Result<T, Error>;
