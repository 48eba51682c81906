//! Command handlers module.
//!
//! This module organizes the CLI command implementations into separate files:
//! - `notes.rs`: Note commands (edit, print, delete, path)
//! - `sync.rs`: Repository commands (commit, push, pull)
//! - `config.rs`: Configuration display and shell completions

mod config;
mod notes;
mod sync;

use clap::Args;

pub use config::{cmd_completions, cmd_config};
pub use notes::{cmd_delete, cmd_edit, cmd_path, cmd_print};
pub use sync::{cmd_commit, cmd_pull, cmd_push};

/// Selects the note to operate on.
///
/// Both default to the repository containing the working directory.
#[derive(Args, Debug, Default)]
pub struct NoteTarget {
    /// Project name (requires --branch).
    #[arg(short, long)]
    pub project: Option<String>,

    /// Branch name.
    #[arg(short, long)]
    pub branch: Option<String>,
}

impl NoteTarget {
    /// Applies the overrides to a session.
    ///
    /// # Errors
    ///
    /// Returns [`gitnotes::Error::BadParameter`] for a project without a
    /// branch.
    pub fn apply(self, mut session: gitnotes::Session) -> gitnotes::Result<gitnotes::Session> {
        if let Some(project) = self.project {
            session = session.with_project(project);
        }
        if let Some(branch) = self.branch {
            session = session.with_branch(branch);
        }
        session.validate()?;
        Ok(session)
    }
}

/// Remote selection for push and pull.
#[derive(Args, Debug, Default)]
pub struct RemoteArgs {
    /// Remote URL, registered as `origin` if none is configured.
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,
}
