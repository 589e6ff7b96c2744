//! UI context error types.

use thiserror::Error;

/// UI context error type.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("UI context is closed")]
    Closed,

    #[error("Failed to spawn UI thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("UI thread panicked")]
    Panicked,
}

/// Result type for UI context operations.
pub type UiResult<T> = Result<T, UiError>;
