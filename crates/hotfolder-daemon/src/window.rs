//! Stand-in main window for headless runs.

use std::path::{Path, PathBuf};

use hotfolder_core::{Collaborator, Error, Result};
use tracing::{info, warn};

/// A project opened in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProject {
    pub path: PathBuf,
    pub name: String,
    pub bytes: usize,
}

/// Main window that reads project files and reports playback in the log.
#[derive(Debug, Default)]
pub struct ProjectWindow {
    loaded: Option<LoadedProject>,
}

impl ProjectWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedProject> {
        self.loaded.as_ref()
    }
}

/// The top-level `name:` entry of a project, if present.
fn project_name(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("name:"))
        .map(|name| name.trim().trim_matches(['"', '\'']).to_string())
        .filter(|name| !name.is_empty())
}

impl Collaborator for ProjectWindow {
    fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let name = project_name(&content).unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        info!(path = %path.display(), name = %name, bytes = content.len(), "Project opened");
        self.loaded = Some(LoadedProject {
            path: path.to_path_buf(),
            name,
            bytes: content.len(),
        });
        Ok(())
    }

    /// Playing with nothing loaded (e.g. after a failed load) only warns.
    fn play(&mut self) -> Result<()> {
        let Some(project) = self.loaded() else {
            warn!("Play requested with no project loaded");
            return Ok(());
        };
        info!(
            name = %project.name,
            path = %project.path.display(),
            bytes = project.bytes,
            "Playing project"
        );
        Ok(())
    }

    fn label(&self) -> &str {
        "project window"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_load_reads_project_name() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("song.ustx");
        std::fs::write(&path, "ustx_version: 0.6\nname: \"Evening Song\"\nbpm: 120\n")
            .expect("Failed to write project");

        let mut window = ProjectWindow::new();
        window.load_file(&path).expect("Project loads");

        let loaded = window.loaded().expect("Project recorded");
        assert_eq!(loaded.name, "Evening Song");
        assert_eq!(loaded.path, path);
        window.play().expect("Loaded project plays");
    }

    #[test]
    fn test_nameless_project_uses_file_stem() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("untitled.ustx");
        std::fs::write(&path, "bpm: 120\n").expect("Failed to write project");

        let mut window = ProjectWindow::new();
        window.load_file(&path).expect("Project loads");

        assert_eq!(window.loaded().map(|p| p.name.as_str()), Some("untitled"));
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut window = ProjectWindow::new();

        let result = window.load_file(&dir.path().join("gone.ustx"));

        assert_matches!(result, Err(Error::Load { .. }));
        assert!(window.loaded().is_none());
    }

    #[test]
    fn test_play_without_project_is_not_an_error() {
        let mut window = ProjectWindow::new();

        window.play().expect("Nothing to play is only a warning");
        assert!(window.loaded().is_none());
    }

    #[test]
    fn test_play_after_failed_load_keeps_previous_project() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("song.ustx");
        std::fs::write(&path, "name: song
").expect("Failed to write project");

        let mut window = ProjectWindow::new();
        window.load_file(&path).expect("Project loads");
        assert!(window.load_file(&dir.path().join("gone.ustx")).is_err());

        window.play().expect("Previous project still plays");
        assert_eq!(window.loaded().map(|p| p.path.as_path()), Some(path.as_path()));
    }
}
