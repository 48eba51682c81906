//! # gitnotes
//!
//! Free-form notes for every project and branch you work on, versioned in a
//! secondary git repository.
//!
//! The active project and branch are derived from the repository containing
//! the working directory (or given explicitly), and mapped to a plain text
//! file under the notes root:
//!
//! ```text
//! <notes root>/<project>/<branch>
//! ```
//!
//! Branch names containing `/` become nested directories. The notes root is
//! initialised as a git repository on first use, and can be committed, pushed
//! and pulled like any other repository.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gitnotes::{NotesService, Session};
//!
//! let session = Session::new("/home/me/gitnotes").with_editor("nvim");
//! let service = NotesService::new(session);
//! service.edit()?;
//! service.push()?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod context;
pub mod git;
pub mod models;
pub mod observability;
pub mod services;

// Re-exports for convenience
pub use config::GitnotesConfig;
pub use models::{Author, ResolvedLocation, Session};
pub use services::NotesService;

/// Error type for gitnotes operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `NotAuthorized` | Permission denied creating the notes root, note directories or files |
/// | `NotFound` | Deleting a note that was never created |
/// | `BadParameter` | A project override is given without a branch override (CLI), an empty remote URL |
/// | `NoRemoteConfigured` | Push/pull without an `origin` remote and without a URL to register |
/// | `NotAGitRepository` | Auto-resolving the project outside of a git repository |
/// | `BadReference` | HEAD is detached or does not point to `refs/heads/...` |
/// | `OperationFailed` | I/O errors, git operations fail, the editor fails |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Permission was denied on a path.
    #[error("not authorized to access {}", path.display())]
    NotAuthorized {
        /// The path that could not be created or opened.
        path: PathBuf,
    },

    /// A note does not exist.
    #[error("note not found: {}", path.display())]
    NotFound {
        /// The note path that was looked up.
        path: PathBuf,
    },

    /// Invalid combination of parameters.
    ///
    /// Raised when:
    /// - A project is given without a branch
    /// - An empty remote URL is registered
    #[error("bad parameter: {0}")]
    BadParameter(String),

    /// No remote is registered and no URL was supplied.
    ///
    /// This is recoverable: register a remote with
    /// [`NotesService::add_origin`] and retry.
    #[error("no remote '{remote}' configured")]
    NoRemoteConfigured {
        /// Name of the missing remote.
        remote: String,
    },

    /// The working directory is not inside a git repository.
    #[error("not a git repository: {}", path.display())]
    NotAGitRepository {
        /// The directory that was inspected.
        path: PathBuf,
    },

    /// HEAD could not be resolved to a branch name.
    #[error("bad reference: {reference}")]
    BadReference {
        /// Description of the offending reference.
        reference: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur
    /// - Git operations fail (open, commit, transport)
    /// - The editor cannot be spawned or exits unsuccessfully
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns `true` when the error can be resolved by registering a remote.
    #[must_use]
    pub const fn is_missing_remote(&self) -> bool {
        matches!(self, Self::NoRemoteConfigured { .. })
    }

    /// Builds an `OperationFailed` error.
    pub(crate) fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Classifies an I/O error on `path`, tagging permission failures.
    pub(crate) fn from_io(operation: &str, path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::NotAuthorized { path },
            _ => Self::OperationFailed {
                operation: operation.to_string(),
                cause: format!("{}: {err}", path.display()),
            },
        }
    }
}

/// Result type alias for gitnotes operations.
pub type Result<T> = std::result::Result<T, Error>;
