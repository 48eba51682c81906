//! Session state for a single invocation.

use crate::config::GitnotesConfig;
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Editor used when none is configured.
pub const DEFAULT_EDITOR: &str = "vi";

/// Identity used to attribute commits in the notes repository.
///
/// Either field may be empty when no global git identity is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    /// Value of `user.name`.
    pub name: String,
    /// Value of `user.email`.
    pub email: String,
}

impl Author {
    /// Creates an author from a name and email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns `true` when both name and email are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

/// Configuration and overrides for one run of the tool.
///
/// Built once from defaults, the config file and CLI flags (later stages win),
/// then handed to [`crate::NotesService`].
///
/// # Examples
///
/// ```rust
/// use gitnotes::Session;
///
/// let session = Session::new("/tmp/notes")
///     .with_project("gitnotes")
///     .with_branch("feature/x");
/// assert!(session.validate().is_ok());
/// assert_eq!(session.project_override(), Some("gitnotes"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// External program used to edit notes.
    pub editor: String,
    /// Location of the notes repository.
    pub notes_root: PathBuf,
    /// Explicit project; empty or `None` means auto-resolve.
    pub project: Option<String>,
    /// Explicit branch; empty or `None` means auto-resolve.
    pub branch: Option<String>,
    /// Commit message; a timestamped default is used when empty.
    pub commit_message: Option<String>,
    /// Commit after every edit session.
    pub always_commit: bool,
    /// Remote URL registered as `origin` when none exists yet.
    pub remote_url: Option<String>,
    /// Commit author.
    pub author: Author,
    /// Directory used for project/branch detection instead of the process
    /// working directory.
    pub working_dir: Option<PathBuf>,
}

impl Session {
    /// Creates a session storing notes under `notes_root`.
    #[must_use]
    pub fn new(notes_root: impl Into<PathBuf>) -> Self {
        Self {
            editor: DEFAULT_EDITOR.to_string(),
            notes_root: notes_root.into(),
            project: None,
            branch: None,
            commit_message: None,
            always_commit: false,
            remote_url: None,
            author: Author::default(),
            working_dir: None,
        }
    }

    /// Creates a session from loaded configuration.
    #[must_use]
    pub fn from_config(config: &GitnotesConfig) -> Self {
        Self::new(&config.notes_path)
            .with_editor(&config.editor)
            .with_always_commit(config.always_commit)
    }

    /// Sets the editor. An empty value keeps the current one.
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        let editor = editor.into();
        if !editor.trim().is_empty() {
            self.editor = editor;
        }
        self
    }

    /// Sets the project override.
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the branch override.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Sets the commit message.
    #[must_use]
    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    /// Enables or disables committing after each edit.
    #[must_use]
    pub const fn with_always_commit(mut self, always_commit: bool) -> Self {
        self.always_commit = always_commit;
        self
    }

    /// Sets the remote URL used when `origin` is missing.
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    /// Sets the commit author.
    #[must_use]
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    /// Sets the directory used for project and branch detection.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Returns the project override, if set and non-empty.
    #[must_use]
    pub fn project_override(&self) -> Option<&str> {
        non_empty(self.project.as_deref())
    }

    /// Returns the branch override, if set and non-empty.
    #[must_use]
    pub fn branch_override(&self) -> Option<&str> {
        non_empty(self.branch.as_deref())
    }

    /// Returns the commit message, if set and non-empty.
    #[must_use]
    pub fn commit_message(&self) -> Option<&str> {
        non_empty(self.commit_message.as_deref())
    }

    /// Returns the remote URL, if set and non-empty.
    #[must_use]
    pub fn remote_url(&self) -> Option<&str> {
        non_empty(self.remote_url.as_deref())
    }

    /// Returns the editor command, or [`DEFAULT_EDITOR`] when it is blank.
    #[must_use]
    pub fn editor(&self) -> &str {
        non_empty(Some(&self.editor)).unwrap_or(DEFAULT_EDITOR)
    }

    /// Returns the notes root.
    #[must_use]
    pub fn notes_root(&self) -> &Path {
        &self.notes_root
    }

    /// Returns the directory used for detection.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the process working
    /// directory cannot be read.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(|e| Error::operation("current_dir", e)),
        }
    }

    /// Checks that the overrides form a usable target.
    ///
    /// A project without a branch is rejected: the branch of the current
    /// repository says nothing about another project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadParameter`] when a project is given without a branch.
    pub fn validate(&self) -> Result<()> {
        if self.project_override().is_some() && self.branch_override().is_none() {
            return Err(Error::BadParameter(
                "branch is necessary when specifying a project".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
