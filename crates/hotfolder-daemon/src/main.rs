//! Hotfolder daemon - opens and plays projects dropped into a watched folder.
//!
//! An external tool writes `.ustx` project files into the watched folder;
//! each new file is opened in the main window and played a few seconds
//! later.

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod signals;
mod window;

use hotfolder_ui::UiContext;

use crate::signals::ShutdownSignals;
use crate::window::ProjectWindow;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;

    // Initialize logging
    let level = &config.daemon.log_level;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("hotfolder_daemon={level}").parse()?)
                .add_directive(format!("hotfolder_watch={level}").parse()?)
                .add_directive(format!("hotfolder_ui={level}").parse()?)
                .add_directive(format!("hotfolder_core={level}").parse()?),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Hotfolder");

    // Start the UI context and give it a main window
    let ui = UiContext::spawn(Handle::current()).context("Failed to start UI context")?;
    ui.handle()
        .install_main_window(ProjectWindow::new())
        .context("Failed to install main window")?;

    // Start watching; the app keeps running without a watcher if this fails
    let watch_config = config.watch.to_watch_config();
    let watch = match hotfolder_watch::start(&watch_config, ui.handle()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!(
                path = %watch_config.directory.display(),
                error = %e,
                "Watched folder unavailable, continuing without watcher"
            );
            None
        }
    };

    let mut signals = ShutdownSignals::new()?;

    info!("Hotfolder running. Press Ctrl+C to exit.");
    let reason = signals.wait().await;

    // Cleanup
    info!(%reason, "Shutting down...");
    tokio::task::spawn_blocking(move || {
        if let Some(watch) = watch {
            watch.stop();
        }
        ui.shutdown()
    })
    .await
    .context("Shutdown task failed")?
    .context("UI context did not stop cleanly")?;

    info!("Hotfolder stopped");
    Ok(())
}
