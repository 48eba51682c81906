//! Resolved project and branch for one operation.

use std::fmt;

/// The project and branch a note belongs to.
///
/// Recomputed for every operation; never persisted. The branch may contain
/// `/`, in which case each segment becomes a directory level on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Project name.
    pub project: String,
    /// Branch name.
    pub branch: String,
}

impl ResolvedLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(project: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            branch: branch.into(),
        }
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.project, self.branch)
    }
}
