//! OS file notifications for the watched folder.
//!
//! The notify backend delivers events on its own thread. A dedicated
//! `fs-watcher` thread drains them and hands creations to the
//! [`AutoLoader`], which never blocks: all real work is posted onto the UI
//! context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc as std_mpsc;
use std::thread::JoinHandle;

use hotfolder_core::{FileCreatedEvent, WatchConfig, prepare_directory};
use hotfolder_ui::UiHandle;
use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::error::WatchResult;
use crate::loader::AutoLoader;

/// A running folder watch.
///
/// Dropping the handle stops the OS watch; [`WatchHandle::stop`] also
/// cancels pending plays and waits for the watcher thread.
pub struct WatchHandle {
    directory: PathBuf,
    loader: Arc<AutoLoader>,
    watcher: Option<RecommendedWatcher>,
    thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("directory", &self.directory)
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

impl WatchHandle {
    /// The watched directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The loader fed by this watch.
    #[must_use]
    pub fn loader(&self) -> &Arc<AutoLoader> {
        &self.loader
    }

    /// Stop watching, cancel pending plays and join the watcher thread.
    pub fn stop(mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("File watcher thread panicked");
            }
        }
        info!(path = %self.directory.display(), "Stopped watching folder");
    }

    fn shutdown(&mut self) {
        self.loader.stop();
        // Dropping the watcher closes the event channel, ending the thread
        self.watcher.take();
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start watching `config.directory` for created files.
///
/// The directory is created if it does not exist. Each call starts an
/// independent watch.
///
/// # Errors
/// Returns `DirectoryUnavailable` if the directory cannot be created or
/// read, `InvalidPattern` for a bad pattern, or a notify error if the OS
/// watch cannot be established.
pub fn start(config: &WatchConfig, ui: UiHandle) -> WatchResult<WatchHandle> {
    prepare_directory(&config.directory)?;
    let loader = Arc::new(AutoLoader::new(config, ui)?);

    let (event_tx, event_rx) = std_mpsc::channel::<notify::Result<Event>>();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = event_tx.send(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config.directory, RecursiveMode::NonRecursive)?;

    let thread_loader = Arc::clone(&loader);
    let thread = std::thread::Builder::new()
        .name("fs-watcher".to_string())
        .spawn(move || pump_events(&event_rx, &thread_loader))?;

    info!(
        path = %config.directory.display(),
        pattern = %config.pattern,
        "Watching folder"
    );

    Ok(WatchHandle {
        directory: config.directory.clone(),
        loader,
        watcher: Some(watcher),
        thread: Some(thread),
    })
}

fn pump_events(event_rx: &std_mpsc::Receiver<notify::Result<Event>>, loader: &AutoLoader) {
    for res in event_rx {
        match res {
            Ok(event) => {
                for created in created_files(event) {
                    debug!(path = %created.path().display(), "File created");
                    loader.handle_event(created);
                }
            }
            Err(e) => warn!(error = %e, "File watcher error"),
        }
    }
    debug!("File watcher thread exiting");
}

/// Files that appeared in the folder: creations, and files moved in.
///
/// A rename reported without a direction covers both ends, so only paths
/// that now exist as files count.
fn created_files(event: Event) -> Vec<FileCreatedEvent> {
    match event.kind {
        EventKind::Create(CreateKind::File | CreateKind::Any | CreateKind::Other) => {
            event.paths.into_iter().map(FileCreatedEvent::new).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Any)) => event
            .paths
            .into_iter()
            .filter(|path| path.is_file())
            .map(FileCreatedEvent::new)
            .collect(),
        _ => Vec::new(),
    }
}
