//! Commands executed on the UI context.
//!
//! Commands are posted from any thread and processed strictly in order by
//! the UI thread, which is the only place the main window is touched.

use std::time::Duration;

use hotfolder_core::{Collaborator, FileCreatedEvent, PlayPolicy};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::window::WindowId;

/// Request to open a newly created file and play it after a delay.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    /// The creation event that triggered the request
    pub event: FileCreatedEvent,
    /// Delay between `load_file` and `play`
    pub play_delay: Duration,
    /// Handling of a play still pending from an earlier request
    pub play_policy: PlayPolicy,
    /// Cancelled when the originating watcher stops
    pub watch_token: CancellationToken,
}

/// A unit of work for the UI context.
pub enum UiCommand {
    /// Open a file in the main window and schedule playback
    OpenFile(OpenRequest),
    /// Start playback, if `window` is still the main window
    Play { window: WindowId },
    /// Install a new main window, closing the current one
    InstallMainWindow(Box<dyn Collaborator>),
    /// Close the main window, cancelling its pending plays
    CloseMainWindow,
    /// Reply once every earlier command has been processed
    Flush(oneshot::Sender<()>),
    /// Stop the UI context
    Shutdown,
}

impl std::fmt::Debug for UiCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenFile(request) => f.debug_tuple("OpenFile").field(request).finish(),
            Self::Play { window } => f.debug_struct("Play").field("window", window).finish(),
            Self::InstallMainWindow(window) => {
                f.debug_tuple("InstallMainWindow").field(&window.label()).finish()
            }
            Self::CloseMainWindow => f.write_str("CloseMainWindow"),
            Self::Flush(_) => f.write_str("Flush"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}
