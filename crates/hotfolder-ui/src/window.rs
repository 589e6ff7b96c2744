//! Main window slot owned by the UI context.

use std::fmt;

use hotfolder_core::{Collaborator, PlayPolicy};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Identity of an installed main window.
///
/// A fresh id is assigned on every install, so a delayed play can tell
/// whether the window that loaded the file is still the one on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// The installed main window and the plays it has pending.
pub(crate) struct MainWindow {
    pub(crate) id: WindowId,
    pub(crate) window: Box<dyn Collaborator>,
    /// Cancelled when this window is closed or replaced
    lifetime: CancellationToken,
    /// Most recently scheduled play
    pending_play: Option<CancellationToken>,
}

impl MainWindow {
    /// Token for a new delayed play of this window.
    ///
    /// With [`PlayPolicy::Coalesce`] the previously pending play is cancelled.
    pub(crate) fn play_token(&mut self, policy: PlayPolicy) -> CancellationToken {
        if policy == PlayPolicy::Coalesce {
            if let Some(previous) = self.pending_play.take() {
                if !previous.is_cancelled() {
                    debug!(window = %self.id, "Coalescing pending play");
                }
                previous.cancel();
            }
        }

        let token = self.lifetime.child_token();
        self.pending_play = Some(token.clone());
        token
    }
}

/// Holds at most one main window.
#[derive(Default)]
pub(crate) struct WindowSlot {
    current: Option<MainWindow>,
    next_id: u64,
}

impl WindowSlot {
    /// Install `window` as the main window, closing any previous one.
    pub(crate) fn install(&mut self, window: Box<dyn Collaborator>) -> WindowId {
        self.close();

        self.next_id += 1;
        let id = WindowId(self.next_id);
        info!(window = %id, label = window.label(), "Main window installed");

        self.current = Some(MainWindow {
            id,
            window,
            lifetime: CancellationToken::new(),
            pending_play: None,
        });
        id
    }

    /// Close the main window, cancelling all of its pending plays.
    pub(crate) fn close(&mut self) -> Option<WindowId> {
        let closed = self.current.take()?;
        closed.lifetime.cancel();
        info!(window = %closed.id, "Main window closed");
        Some(closed.id)
    }

    pub(crate) fn main_mut(&mut self) -> Option<&mut MainWindow> {
        self.current.as_mut()
    }
}
