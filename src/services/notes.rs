//! Notes service.
//!
//! Entry point for every user-facing operation. Each method composes identity
//! resolution, path derivation and the notes repository lifecycle.

use super::PathManager;
use super::editor;
use crate::context;
use crate::git::{NotesRepository, PullOutcome, PushOutcome};
use crate::models::{ResolvedLocation, Session};
use crate::{Error, Result};
use git2::Oid;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Service for editing, reading and syncing notes.
pub struct NotesService {
    /// Session for this invocation.
    session: Session,
    /// Path derivation under the notes root.
    paths: PathManager,
    /// Git operations on the notes root.
    repo: NotesRepository,
}

impl NotesService {
    /// Creates a notes service for a session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        let paths = PathManager::new(session.notes_root());
        let repo = NotesRepository::new(session.notes_root(), session.author.clone());
        Self {
            session,
            paths,
            repo,
        }
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Resolves the note location for the session.
    ///
    /// # Errors
    ///
    /// Returns an error if project or branch cannot be resolved.
    pub fn location(&self) -> Result<ResolvedLocation> {
        context::resolve_location(&self.session)
    }

    /// Returns the note path for the session.
    ///
    /// # Errors
    ///
    /// Returns an error if project or branch cannot be resolved.
    pub fn note_path(&self) -> Result<PathBuf> {
        Ok(self.paths.location_path(&self.location()?))
    }

    /// Opens the note of the current project and branch in the editor.
    ///
    /// Creates the note and its directories when missing. With
    /// `always_commit`, commits afterwards; a failed commit is logged and
    /// does not fail the edit.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution, directory creation or the editor fails.
    #[instrument(skip(self), fields(operation = "notes.edit"))]
    pub fn edit(&self) -> Result<()> {
        let start = Instant::now();
        let note = self.prepare_note()?;
        editor::touch_note(&note)?;
        editor::launch(self.session.editor(), &note)?;

        if self.session.always_commit {
            if let Err(e) = self.repo.stage_and_commit(self.session.commit_message()) {
                info!(error = %e, "automatic commit after edit failed");
            }
        }

        debug!(
            path = %note.display(),
            duration_ms = start.elapsed().as_millis(),
            "edit finished"
        );
        Ok(())
    }

    /// Returns the content of the current note.
    ///
    /// A note that was never written reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution, directory creation or reading fails.
    #[instrument(skip(self), fields(operation = "notes.read"))]
    pub fn read_note(&self) -> Result<String> {
        let note = self.prepare_note()?;
        match std::fs::read_to_string(&note) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %note.display(), "note does not exist yet");
                Ok(String::new())
            },
            Err(e) => Err(Error::from_io("read_note", &note, &e)),
        }
    }

    /// Deletes the current note.
    ///
    /// The deletion is picked up by the next commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the note does not exist.
    #[instrument(skip(self), fields(operation = "notes.delete"))]
    pub fn delete(&self) -> Result<()> {
        let note = self.note_path()?;

        match std::fs::remove_file(&note) {
            Ok(()) => {
                info!(path = %note.display(), "deleted note");
                Ok(())
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound { path: note })
            },
            Err(e) => Err(Error::from_io("delete_note", &note, &e)),
        }
    }

    /// Commits every change in the notes repository.
    ///
    /// Uses the session commit message, or a timestamped default. Returns
    /// `None` when there was nothing to commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or committed to.
    #[instrument(skip(self), fields(operation = "notes.commit"))]
    pub fn commit(&self) -> Result<Option<Oid>> {
        self.repo.stage_and_commit(self.session.commit_message())
    }

    /// Commits pending changes and pushes them to `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRemoteConfigured`] when `origin` is missing and the
    /// session has no remote URL; callers may register one with
    /// [`Self::add_origin`] and retry.
    #[instrument(skip(self), fields(operation = "notes.push"))]
    pub fn push(&self) -> Result<PushOutcome> {
        self.ensure_repository_best_effort();
        self.repo.push(self.session.remote_url())
    }

    /// Fetches `origin` and integrates it into the notes repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRemoteConfigured`] when `origin` is missing and the
    /// session has no remote URL.
    #[instrument(skip(self), fields(operation = "notes.pull"))]
    pub fn pull(&self) -> Result<PullOutcome> {
        self.ensure_repository_best_effort();
        self.repo.pull(self.session.remote_url())
    }

    /// Registers `url` as `origin` of the notes repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or cannot be stored.
    #[instrument(skip(self), fields(operation = "notes.add_origin"))]
    pub fn add_origin(&self, url: &str) -> Result<()> {
        self.repo.add_origin(url)
    }

    /// Returns the notes root. Performs no I/O.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.session.notes_root()
    }

    /// Resolves the note path and creates the directories leading to it.
    fn prepare_note(&self) -> Result<PathBuf> {
        let location = self.location()?;
        self.paths.ensure_root()?;
        let note = self.paths.location_path(&location);
        PathManager::ensure_parent_dir(&note)?;
        debug!(location = %location, path = %note.display(), "resolved note");
        Ok(note)
    }

    fn ensure_repository_best_effort(&self) {
        if let Err(e) = self.repo.ensure_repository() {
            debug!(error = %e, "could not prepare notes repository");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        Session::new(dir.path().join("notes"))
            .with_working_dir(dir.path())
            .with_project("proj")
            .with_branch("feature/x")
            .with_author(Author::new("test", "test@test.com"))
    }

    #[test]
    fn test_path_is_notes_root() {
        let service = NotesService::new(Session::new("/somewhere/notes"));
        assert_eq!(service.path(), Path::new("/somewhere/notes"));
        assert!(!Path::new("/somewhere/notes").exists());
    }

    #[test]
    fn test_note_path_uses_overrides() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir));

        let expected = dir.path().join("notes").join("proj").join("feature").join("x");
        assert_eq!(service.note_path().unwrap(), expected);
    }

    #[test]
    fn test_read_missing_note_is_empty() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir));

        assert_eq!(service.read_note().unwrap(), "");
        // Directories exist, the note does not
        let note = service.note_path().unwrap();
        assert!(note.parent().unwrap().is_dir());
        assert!(!note.exists());
    }

    #[test]
    fn test_read_existing_note() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir));
        let note = service.note_path().unwrap();
        std::fs::create_dir_all(note.parent().unwrap()).unwrap();
        std::fs::write(&note, "remember the milk\n").unwrap();

        assert_eq!(service.read_note().unwrap(), "remember the milk\n");
    }

    #[test]
    fn test_delete_missing_note() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir));

        assert!(matches!(service.delete(), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_delete_existing_note() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir));
        service.read_note().unwrap();
        let note = service.note_path().unwrap();
        std::fs::write(&note, "x").unwrap();

        service.delete().unwrap();
        assert!(!note.exists());
    }

    #[test]
    fn test_project_override_detects_branch() {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path().join("source")).unwrap();
        repo.set_head("refs/heads/main").unwrap();
        let service = NotesService::new(
            Session::new(dir.path().join("notes"))
                .with_working_dir(dir.path().join("source"))
                .with_project("other"),
        );

        assert_eq!(service.read_note().unwrap(), "");
        assert_eq!(
            service.location().unwrap(),
            ResolvedLocation::new("other", "main")
        );
        assert!(matches!(service.delete(), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_delete_absolute_project_stays_in_root() {
        let dir = TempDir::new().unwrap();
        let outside = dir.path().join("outside");
        std::fs::create_dir_all(&outside).unwrap();
        std::fs::write(outside.join("important"), "keep").unwrap();

        let service = NotesService::new(
            Session::new(dir.path().join("notes"))
                .with_project(outside.to_str().unwrap())
                .with_branch("important"),
        );

        assert!(service.note_path().unwrap().starts_with(service.path()));
        assert!(matches!(service.delete(), Err(Error::NotFound { .. })));
        assert_eq!(
            std::fs::read_to_string(outside.join("important")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn test_commit_uses_session_message() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir).with_commit_message("my message"));
        service.read_note().unwrap();
        std::fs::write(service.note_path().unwrap(), "content").unwrap();

        let oid = service.commit().unwrap().unwrap();

        let repo = git2::Repository::open(service.path()).unwrap();
        assert_eq!(repo.find_commit(oid).unwrap().message(), Some("my message"));
    }

    #[test]
    fn test_push_without_remote() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir));

        assert!(service.push().unwrap_err().is_missing_remote());
        assert!(service.pull().unwrap_err().is_missing_remote());
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_with_always_commit() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(
            session(&dir)
                .with_editor("true")
                .with_always_commit(true),
        );
        std::fs::create_dir_all(dir.path().join("notes")).unwrap();

        service.edit().unwrap();

        let repo = git2::Repository::open(service.path()).unwrap();
        let commit = repo.head().unwrap().peel_to_commit().unwrap();
        assert!(commit.message().unwrap().starts_with("Update notes - "));
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_editor_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let service = NotesService::new(session(&dir).with_editor("false"));

        assert!(matches!(
            service.edit(),
            Err(Error::OperationFailed { .. })
        ));
        // The note was still created before the editor ran
        assert!(service.note_path().unwrap().exists());
    }
}
