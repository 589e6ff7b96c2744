//! The UI execution context.
//!
//! A dedicated thread drains an unbounded FIFO of [`UiCommand`]s. The thread
//! enters the tokio runtime it was spawned with, so delayed plays can be
//! scheduled straight from UI code and post back onto the same queue when
//! they fire.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use hotfolder_core::{Collaborator, Error as CoreError};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::command::{OpenRequest, UiCommand};
use crate::error::{UiError, UiResult};
use crate::window::{WindowId, WindowSlot};

/// Cloneable handle for posting work onto the UI context.
#[derive(Clone)]
pub struct UiHandle {
    command_tx: mpsc::UnboundedSender<UiCommand>,
}

impl std::fmt::Debug for UiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiHandle")
            .field("closed", &self.command_tx.is_closed())
            .finish()
    }
}

impl UiHandle {
    /// A handle whose commands are drained by the caller instead of a
    /// [`UiContext`] thread, for hosts that run their own event loop.
    #[must_use]
    pub fn detached() -> (Self, mpsc::UnboundedReceiver<UiCommand>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        (Self { command_tx }, command_rx)
    }

    /// Post a command; it runs after every command posted before it.
    ///
    /// # Errors
    /// Returns [`UiError::Closed`] if the UI context has shut down.
    pub fn post(&self, command: UiCommand) -> UiResult<()> {
        self.command_tx.send(command).map_err(|_| UiError::Closed)
    }

    /// Install `window` as the main window.
    ///
    /// # Errors
    /// Returns [`UiError::Closed`] if the UI context has shut down.
    pub fn install_main_window(&self, window: impl Collaborator + 'static) -> UiResult<()> {
        self.post(UiCommand::InstallMainWindow(Box::new(window)))
    }

    /// Close the main window and cancel its pending plays.
    ///
    /// # Errors
    /// Returns [`UiError::Closed`] if the UI context has shut down.
    pub fn close_main_window(&self) -> UiResult<()> {
        self.post(UiCommand::CloseMainWindow)
    }

    /// Wait until every previously posted command has run.
    ///
    /// # Errors
    /// Returns [`UiError::Closed`] if the UI context shut down first.
    pub async fn flush(&self) -> UiResult<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.post(UiCommand::Flush(done_tx))?;
        done_rx.await.map_err(|_| UiError::Closed)
    }

    /// Whether the UI context has stopped accepting commands.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }
}

/// Owner of the UI thread.
pub struct UiContext {
    handle: UiHandle,
    thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext").finish_non_exhaustive()
    }
}

impl UiContext {
    /// Spawn the UI thread.
    ///
    /// `runtime` drives the delayed plays scheduled by the UI thread.
    ///
    /// # Errors
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(runtime: Handle) -> UiResult<Self> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let ui_loop = UiLoop {
            windows: WindowSlot::default(),
            command_tx: command_tx.downgrade(),
            runtime,
        };

        let thread = thread::Builder::new()
            .name("ui-context".to_string())
            .spawn(move || ui_loop.run(command_rx))?;

        Ok(Self {
            handle: UiHandle { command_tx },
            thread: Some(thread),
        })
    }

    /// A handle for posting commands.
    #[must_use]
    pub fn handle(&self) -> UiHandle {
        self.handle.clone()
    }

    /// Stop the UI thread and wait for it to exit.
    ///
    /// Commands posted before this call still run; the main window is then
    /// closed, which cancels its pending plays.
    ///
    /// # Errors
    /// Returns [`UiError::Panicked`] if the UI thread panicked.
    pub fn shutdown(mut self) -> UiResult<()> {
        let _ = self.handle.post(UiCommand::Shutdown);
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| UiError::Panicked),
            None => Ok(()),
        }
    }
}

impl Drop for UiContext {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.handle.post(UiCommand::Shutdown);
        }
    }
}

/// State owned by the UI thread.
struct UiLoop {
    windows: WindowSlot,
    /// Weak, so the loop ends once every [`UiHandle`] is gone
    command_tx: mpsc::WeakUnboundedSender<UiCommand>,
    runtime: Handle,
}

impl UiLoop {
    fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<UiCommand>) {
        let runtime = self.runtime.clone();
        let _entered = runtime.enter();
        info!("UI context started");

        while let Some(command) = command_rx.blocking_recv() {
            match command {
                UiCommand::OpenFile(request) => self.open_file(request),
                UiCommand::Play { window } => self.play(window),
                UiCommand::InstallMainWindow(window) => {
                    self.windows.install(window);
                }
                UiCommand::CloseMainWindow => {
                    if self.windows.close().is_none() {
                        debug!("No main window to close");
                    }
                }
                UiCommand::Flush(done) => {
                    let _ = done.send(());
                }
                UiCommand::Shutdown => break,
            }
        }

        self.windows.close();
        info!("UI context stopped");
    }

    fn open_file(&mut self, request: OpenRequest) {
        let path = request.event.path();

        let Some(main) = self.windows.main_mut() else {
            warn!(
                path = %path.display(),
                error = %CoreError::CollaboratorUnavailable,
                "Dropping created file"
            );
            return;
        };

        info!(path = %path.display(), window = %main.id, "Calling load_file on main window");
        if let Err(e) = main.window.load_file(path) {
            error!(path = %path.display(), error = %e, "Main window failed to load file");
        }

        if request.watch_token.is_cancelled() {
            debug!(path = %path.display(), "Watcher stopped, not scheduling play");
            return;
        }

        let play_token = main.play_token(request.play_policy);
        let window = main.id;

        debug!(window = %window, delay_ms = request.play_delay.as_millis(), "Play scheduled");
        self.runtime.spawn(play_after(
            request.play_delay,
            window,
            self.command_tx.clone(),
            play_token,
            request.watch_token,
        ));
    }

    fn play(&mut self, window: WindowId) {
        match self.windows.main_mut() {
            Some(main) if main.id == window => {
                info!(window = %window, "Calling play on main window");
                if let Err(e) = main.window.play() {
                    error!(window = %window, error = %e, "Main window failed to start playback");
                }
            }
            Some(main) => {
                warn!(expected = %window, current = %main.id, "Main window replaced, skipping play");
            }
            None => {
                warn!(window = %window, "Main window closed, skipping play");
            }
        }
    }
}

/// Wait out the grace period, then post `Play` back onto the UI context.
async fn play_after(
    delay: Duration,
    window: WindowId,
    command_tx: mpsc::WeakUnboundedSender<UiCommand>,
    play_token: CancellationToken,
    watch_token: CancellationToken,
) {
    tokio::select! {
        () = play_token.cancelled() => {
            debug!(window = %window, "Pending play cancelled");
        }
        () = watch_token.cancelled() => {
            debug!(window = %window, "Watcher stopped, pending play cancelled");
        }
        () = tokio::time::sleep(delay) => {
            let posted = command_tx
                .upgrade()
                .is_some_and(|tx| tx.send(UiCommand::Play { window }).is_ok());
            if !posted {
                warn!(window = %window, "UI context closed before play");
            }
        }
    }
}
