//! Process signals that end the daemon.

use std::fmt;

use anyhow::{Context, Result};
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Why the daemon is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Ctrl+C in the terminal
    Interrupt,
    /// SIGTERM, e.g. from the service manager
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("interrupt"),
            Self::Terminate => f.write_str("terminate"),
        }
    }
}

/// Listens for the signals that stop the daemon.
///
/// SIGTERM is registered on construction, so a signal sent before
/// [`ShutdownSignals::wait`] is first polled is not lost.
pub struct ShutdownSignals {
    terminate: Signal,
}

impl ShutdownSignals {
    /// # Errors
    /// Fails if the SIGTERM handler cannot be installed.
    pub fn new() -> Result<Self> {
        let terminate = signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
        Ok(Self { terminate })
    }

    /// Wait for the first shutdown signal.
    pub async fn wait(&mut self) -> ShutdownReason {
        let interrupted = tokio::select! {
            res = tokio::signal::ctrl_c() => res.is_ok(),
            _ = self.terminate.recv() => return ShutdownReason::Terminate,
        };
        if interrupted {
            return ShutdownReason::Interrupt;
        }

        // Without a Ctrl+C handler only SIGTERM can stop us
        self.terminate.recv().await;
        ShutdownReason::Terminate
    }
}
