//! Git operations.
//!
//! Everything that touches the notes repository through git: the commit
//! author, the `origin` remote, and the repository lifecycle (init, commit,
//! push, pull).

mod author;
mod remote;
mod repository;

pub use author::{parse_author, read_global_author};
pub use remote::{DEFAULT_REMOTE, RemoteManager};
pub use repository::{NotesRepository, PullOutcome, PushOutcome, default_commit_message};

use crate::Error;

/// Wraps a libgit2 error as a failed operation.
pub(crate) fn git_error(operation: &str, e: &git2::Error) -> Error {
    Error::operation(operation, e.message())
}
