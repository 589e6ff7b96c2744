//! End-to-end tests: real folder, real notify backend, real UI context.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use hotfolder_core::{Collaborator, Error as CoreError, WatchConfig};
use hotfolder_ui::UiContext;
use hotfolder_watch::{WatchError, start};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::timeout;

const PLAY_DELAY: Duration = Duration::from_millis(300);
const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
enum Call {
    Load(PathBuf, Instant),
    Play(Instant),
}

struct RecordingWindow {
    calls: mpsc::UnboundedSender<Call>,
}

impl Collaborator for RecordingWindow {
    fn load_file(&mut self, path: &Path) -> hotfolder_core::Result<()> {
        let _ = self.calls.send(Call::Load(path.to_path_buf(), Instant::now()));
        Ok(())
    }

    fn play(&mut self) -> hotfolder_core::Result<()> {
        let _ = self.calls.send(Call::Play(Instant::now()));
        Ok(())
    }
}

fn recording_window() -> (RecordingWindow, mpsc::UnboundedReceiver<Call>) {
    let (calls, rx) = mpsc::unbounded_channel();
    (RecordingWindow { calls }, rx)
}

async fn next_call(calls: &mut mpsc::UnboundedReceiver<Call>) -> Call {
    timeout(EVENT_TIMEOUT, calls.recv())
        .await
        .expect("Timed out waiting for the main window")
        .expect("Main window dropped")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dropped_project_is_loaded_then_played() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ui = UiContext::spawn(Handle::current()).expect("Failed to spawn UI context");
    let (window, mut calls) = recording_window();
    ui.handle().install_main_window(window).expect("UI context open");

    let config = WatchConfig::new(dir.path(), "*.ustx").with_play_delay(PLAY_DELAY);
    let watch = start(&config, ui.handle()).expect("Failed to start watcher");

    std::fs::write(dir.path().join("notes.txt"), b"not a project").expect("Failed to write file");
    std::fs::write(dir.path().join("song.ustx"), b"name: song").expect("Failed to write file");

    let loaded_at = match next_call(&mut calls).await {
        Call::Load(path, at) => {
            assert_eq!(path.file_name(), Some(OsStr::new("song.ustx")));
            at
        }
        other => panic!("Expected load, got {other:?}"),
    };
    match next_call(&mut calls).await {
        Call::Play(at) => assert!(at.duration_since(loaded_at) >= PLAY_DELAY),
        other => panic!("Expected play, got {other:?}"),
    }

    // Nothing for the text file
    tokio::time::sleep(PLAY_DELAY * 2).await;
    ui.handle().flush().await.expect("UI context open");
    assert!(calls.try_recv().is_err());

    watch.stop();
    ui.shutdown().expect("UI thread exited cleanly");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_project_moved_in_from_sibling_is_loaded() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let staging = root.path().join("staging");
    let dir = root.path().join("temp");
    std::fs::create_dir(&staging).expect("Failed to create staging dir");
    let ui = UiContext::spawn(Handle::current()).expect("Failed to spawn UI context");
    let (window, mut calls) = recording_window();
    ui.handle().install_main_window(window).expect("UI context open");

    let config = WatchConfig::new(&dir, "*.ustx").with_play_delay(PLAY_DELAY);
    let watch = start(&config, ui.handle()).expect("Failed to start watcher");

    // Written elsewhere, then handed off in one step
    std::fs::write(staging.join("song.ustx"), b"name: song").expect("Failed to write file");
    std::fs::rename(staging.join("song.ustx"), dir.join("song.ustx")).expect("Failed to move file");

    match next_call(&mut calls).await {
        Call::Load(path, _) => {
            assert_eq!(path.file_name(), Some(OsStr::new("song.ustx")));
            assert!(path.is_file());
        }
        other => panic!("Expected load, got {other:?}"),
    }
    assert_matches!(next_call(&mut calls).await, Call::Play(_));

    watch.stop();
    ui.shutdown().expect("UI thread exited cleanly");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_directory_is_created() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let dir = root.path().join("temp");
    let ui = UiContext::spawn(Handle::current()).expect("Failed to spawn UI context");

    let watch = start(&WatchConfig::new(&dir, "*.ustx"), ui.handle()).expect("Failed to start watcher");

    assert!(dir.is_dir());
    assert_eq!(watch.directory(), dir.as_path());

    watch.stop();
    ui.shutdown().expect("UI thread exited cleanly");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unavailable_directory_fails_to_start() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let blocker = root.path().join("blocker");
    std::fs::write(&blocker, b"a file").expect("Failed to write file");
    let ui = UiContext::spawn(Handle::current()).expect("Failed to spawn UI context");

    let result = start(&WatchConfig::new(blocker.join("temp"), "*.ustx"), ui.handle());

    assert_matches!(result, Err(WatchError::Core(CoreError::DirectoryUnavailable { .. })));
    ui.shutdown().expect("UI thread exited cleanly");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stop_cancels_pending_play() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ui = UiContext::spawn(Handle::current()).expect("Failed to spawn UI context");
    let (window, mut calls) = recording_window();
    ui.handle().install_main_window(window).expect("UI context open");

    let config = WatchConfig::new(dir.path(), "*.ustx").with_play_delay(Duration::from_secs(2));
    let watch = start(&config, ui.handle()).expect("Failed to start watcher");

    std::fs::write(dir.path().join("song.ustx"), b"name: song").expect("Failed to write file");
    assert_matches!(next_call(&mut calls).await, Call::Load(..));

    watch.stop();
    tokio::time::sleep(Duration::from_secs(3)).await;
    ui.handle().flush().await.expect("UI context open");

    assert!(calls.try_recv().is_err());
    ui.shutdown().expect("UI thread exited cleanly");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_main_window_drops_event_and_keeps_watching() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ui = UiContext::spawn(Handle::current()).expect("Failed to spawn UI context");

    let config = WatchConfig::new(dir.path(), "*.ustx").with_play_delay(PLAY_DELAY);
    let watch = start(&config, ui.handle()).expect("Failed to start watcher");

    std::fs::write(dir.path().join("early.ustx"), b"name: early").expect("Failed to write file");
    tokio::time::sleep(Duration::from_secs(1)).await;
    ui.handle().flush().await.expect("UI context survived the dropped event");

    let (window, mut calls) = recording_window();
    ui.handle().install_main_window(window).expect("UI context open");
    std::fs::write(dir.path().join("late.ustx"), b"name: late").expect("Failed to write file");

    match next_call(&mut calls).await {
        Call::Load(path, _) => assert_eq!(path.file_name(), Some(OsStr::new("late.ustx"))),
        other => panic!("Expected load, got {other:?}"),
    }
    assert_matches!(next_call(&mut calls).await, Call::Play(_));

    watch.stop();
    ui.shutdown().expect("UI thread exited cleanly");
}
