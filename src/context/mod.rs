//! Project and branch resolution.
//!
//! Notes are keyed by the project and branch the user is working on. Both
//! come either from explicit overrides on the [`Session`] or from the git
//! repository containing the working directory.
//!
//! # Overview
//!
//! - `project`: final path segment of the repository's top-level directory
//! - `branch`: symbolic target of HEAD with the `refs/heads/` prefix removed
//!
//! The two resolutions are independent: a caller may override one and let
//! the other be detected.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitnotes::{Session, context};
//!
//! let session = Session::new("/home/me/gitnotes").with_branch("scratch");
//! let location = context::resolve_location(&session)?;
//! println!("{location}"); // "<current repo>@scratch"
//! ```

mod detector;

pub use detector::{detect_branch, detect_project};
pub(crate) use detector::branch_from_ref;

use crate::models::{ResolvedLocation, Session};
use crate::Result;
use tracing::debug;

/// Resolves the project for a session.
///
/// # Errors
///
/// Returns [`crate::Error::NotAGitRepository`] when no override is set and
/// the working directory is outside a repository.
pub fn resolve_project(session: &Session) -> Result<String> {
    if let Some(project) = session.project_override() {
        return Ok(project.to_string());
    }
    let dir = session.working_dir()?;
    let project = detect_project(&dir)?;
    debug!(project = %project, dir = %dir.display(), "detected project");
    Ok(project)
}

/// Resolves the branch for a session.
///
/// # Errors
///
/// Returns [`crate::Error::BadReference`] when no override is set and HEAD
/// is detached, or [`crate::Error::NotAGitRepository`] outside a repository.
pub fn resolve_branch(session: &Session) -> Result<String> {
    if let Some(branch) = session.branch_override() {
        return Ok(branch.to_string());
    }
    let dir = session.working_dir()?;
    let branch = detect_branch(&dir)?;
    debug!(branch = %branch, dir = %dir.display(), "detected branch");
    Ok(branch)
}

/// Resolves both project and branch.
///
/// # Errors
///
/// Propagates failures from [`resolve_project`] and [`resolve_branch`].
pub fn resolve_location(session: &Session) -> Result<ResolvedLocation> {
    Ok(ResolvedLocation::new(
        resolve_project(session)?,
        resolve_branch(session)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use git2::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_are_returned_verbatim() {
        // No repository needed when both are given
        let outside = TempDir::new().unwrap();
        let session = Session::new("/tmp/notes")
            .with_working_dir(outside.path())
            .with_project("test_project")
            .with_branch("test_branch");

        let location = resolve_location(&session).unwrap();
        assert_eq!(location, ResolvedLocation::new("test_project", "test_branch"));
    }

    #[test]
    fn test_branch_override_with_detected_project() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        repo.set_head("refs/heads/main").unwrap();

        let session = Session::new("/tmp/notes")
            .with_working_dir(dir.path())
            .with_branch("override");

        let location = resolve_location(&session).unwrap();
        let expected_project = dir.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(location.project, expected_project);
        assert_eq!(location.branch, "override");
    }

    #[test]
    fn test_project_override_with_detected_branch() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        repo.set_head("refs/heads/develop").unwrap();

        let session = Session::new("/tmp/notes")
            .with_working_dir(dir.path())
            .with_project("elsewhere");

        assert_eq!(resolve_project(&session).unwrap(), "elsewhere");
        assert_eq!(resolve_branch(&session).unwrap(), "develop");
    }

    #[test]
    fn test_detection_outside_repository_fails() {
        let dir = TempDir::new().unwrap();
        let session = Session::new("/tmp/notes").with_working_dir(dir.path());

        assert!(matches!(
            resolve_project(&session),
            Err(Error::NotAGitRepository { .. })
        ));
        assert!(matches!(
            resolve_branch(&session),
            Err(Error::NotAGitRepository { .. })
        ));
    }
}
