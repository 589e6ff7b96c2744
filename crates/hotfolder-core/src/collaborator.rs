//! The window contract consumed by the auto-loader.

use std::path::Path;

use crate::error::Result;

/// The UI-owning main window.
///
/// Implementations are moved onto the UI execution context when installed
/// and are only ever called from there, so they need `Send` but not `Sync`.
pub trait Collaborator: Send {
    /// Begin loading a project file.
    ///
    /// Loading may continue asynchronously after this returns; callers do
    /// not wait for completion.
    ///
    /// # Errors
    /// Returns an error if the load could not be started. Callers log it.
    fn load_file(&mut self, path: &Path) -> Result<()>;

    /// Begin playback of whatever is currently loaded.
    ///
    /// # Errors
    /// Returns an error if playback could not be started. Callers log it.
    fn play(&mut self) -> Result<()>;

    /// Short label used in log output.
    fn label(&self) -> &str {
        "main window"
    }
}
