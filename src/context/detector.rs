//! Git context detection implementation.

use crate::{Error, Result};
use git2::{ErrorCode, Repository};
use std::path::Path;

/// Prefix of local branch references.
const HEADS_PREFIX: &str = "refs/heads/";

/// Detects the project name for a path.
///
/// Uses `git2::Repository::discover()` to find the repository containing
/// the given path, traversing parent directories if necessary, and returns
/// the final segment of its top-level directory.
///
/// # Errors
///
/// Returns [`Error::NotAGitRepository`] if the path is not inside a
/// repository with a working directory.
///
/// # Examples
///
/// ```rust,ignore
/// use gitnotes::context::detect_project;
/// use std::path::Path;
///
/// let project = detect_project(Path::new("/home/me/src/gitnotes/src"))?;
/// assert_eq!(project, "gitnotes");
/// ```
pub fn detect_project(path: &Path) -> Result<String> {
    let repo = discover(path)?;

    repo.workdir()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| Error::NotAGitRepository {
            path: path.to_path_buf(),
        })
}

/// Detects the current branch name for a path.
///
/// Reads the symbolic target of HEAD and strips the `refs/heads/` prefix.
/// Works on unborn branches (fresh repositories without commits).
///
/// # Errors
///
/// Returns [`Error::NotAGitRepository`] if the path is not inside a
/// repository, and [`Error::BadReference`] if HEAD is detached or does not
/// point to a local branch.
pub fn detect_branch(path: &Path) -> Result<String> {
    let repo = discover(path)?;

    let head = repo
        .find_reference("HEAD")
        .map_err(|e| Error::BadReference {
            reference: format!("HEAD: {}", e.message()),
        })?;

    // A direct (non-symbolic) HEAD means detached
    let target = head.symbolic_target().ok_or_else(|| Error::BadReference {
        reference: "HEAD is detached".to_string(),
    })?;

    branch_from_ref(target).map(String::from).ok_or_else(|| Error::BadReference {
        reference: format!("couldn't find project branch in '{target}'"),
    })
}

/// Extracts the branch name from a `refs/heads/<name>` reference.
pub(crate) fn branch_from_ref(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(HEADS_PREFIX)
        .filter(|name| !name.is_empty())
}

fn discover(path: &Path) -> Result<Repository> {
    Repository::discover(path).map_err(|e| match e.code() {
        ErrorCode::NotFound => Error::NotAGitRepository {
            path: path.to_path_buf(),
        },
        _ => Error::operation("discover_repository", e),
    })
}
