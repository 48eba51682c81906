//! Centralized path management for the notes repository.
//!
//! This module maps a project and branch to the note file inside the notes
//! root, and creates the directories leading to it:
//!
//! ```text
//! <notes root>/<project>/<branch>
//! ```
//!
//! Branch names may contain `/`. Each slash-delimited segment becomes a
//! directory level, so `feature/login` is stored at
//! `<notes root>/<project>/feature/login`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use gitnotes::services::PathManager;
//!
//! let manager = PathManager::new("/home/me/gitnotes");
//! let note = manager.note_path("gitnotes", "feature/login");
//!
//! manager.ensure_root()?;
//! PathManager::ensure_parent_dir(&note)?;
//! ```

use crate::models::ResolvedLocation;
use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Permissions for directories created under the notes root.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Derives note paths under a notes root.
#[derive(Debug, Clone)]
pub struct PathManager {
    /// The notes repository root.
    notes_root: PathBuf,
}

impl PathManager {
    /// Creates a `PathManager` for the given notes root.
    #[must_use]
    pub fn new(notes_root: impl AsRef<Path>) -> Self {
        Self {
            notes_root: notes_root.as_ref().to_path_buf(),
        }
    }

    /// Returns the notes root.
    #[must_use]
    pub fn notes_root(&self) -> &Path {
        &self.notes_root
    }

    /// Returns the path of the note for `project` and `branch`.
    ///
    /// Pure: performs no I/O.
    ///
    /// # Returns
    ///
    /// `{notes_root}/{project}/{branch}`
    #[must_use]
    pub fn note_path(&self, project: &str, branch: &str) -> PathBuf {
        note_path(&self.notes_root, project, branch)
    }

    /// Returns the path of the note for a resolved location.
    #[must_use]
    pub fn location_path(&self, location: &ResolvedLocation) -> PathBuf {
        self.note_path(&location.project, &location.branch)
    }

    /// Ensures the notes root exists.
    ///
    /// Creates the directory and its parents with owner-only permissions if
    /// absent. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] on permission failures and
    /// [`Error::OperationFailed`] for other filesystem errors.
    pub fn ensure_root(&self) -> Result<()> {
        if self.notes_root.is_dir() {
            return Ok(());
        }
        debug!(path = %self.notes_root.display(), "creating notes root");
        create_dir_all(&self.notes_root)
            .map_err(|e| Error::from_io("create_notes_root", &self.notes_root, &e))
    }

    /// Ensures the parent directory of a path exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] on permission failures and
    /// [`Error::OperationFailed`] for other filesystem errors.
    pub fn ensure_parent_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent).map_err(|e| Error::from_io("create_note_dir", parent, &e))?;
        }
        Ok(())
    }
}

/// Joins `root`, `project` and `branch` into a note path.
///
/// Both names are split on `/` so that every segment becomes a real path
/// component on every platform. Only plain names are kept: root prefixes,
/// `.` and `..` are dropped, so the result always starts with `root`.
#[must_use]
pub fn note_path(root: &Path, project: &str, branch: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in project.split('/').chain(branch.split('/')) {
        path.extend(Path::new(segment).components().filter_map(|component| {
            match component {
                Component::Normal(name) => Some(name),
                _ => None,
            }
        }));
    }
    path
}

#[cfg(unix)]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(path)
}

#[cfg(not(unix))]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}
