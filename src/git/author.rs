//! Commit author resolution from the global git configuration.

use crate::models::Author;
use std::process::Command;
use tracing::debug;

/// Reads the user's global git identity.
///
/// Runs `git config --global --list` and extracts `user.name` and
/// `user.email`. Never fails: any error is logged at debug level and an
/// empty author is returned.
#[must_use]
pub fn read_global_author() -> Author {
    let mut command = Command::new("git");
    command.args(["config", "--global", "--list"]);
    read_author(&mut command)
}

/// Runs `command` and parses its output as `git config --list` lines.
fn read_author(command: &mut Command) -> Author {
    let output = match command.output() {
        Ok(output) => output,
        Err(e) => {
            debug!(error = %e, "could not run git to read the global identity");
            return Author::default();
        },
    };

    if !output.status.success() {
        debug!(
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "reading the git identity failed"
        );
        return Author::default();
    }

    parse_author(&String::from_utf8_lossy(&output.stdout))
}

/// Parses `key=value` lines as printed by `git config --list`.
///
/// Unknown keys and lines without `=` are ignored; the last occurrence of a
/// key wins.
#[must_use]
pub fn parse_author(config: &str) -> Author {
    let mut author = Author::default();

    for line in config.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key {
            "user.name" => author.name = value.to_string(),
            "user.email" => author.email = value.to_string(),
            _ => {},
        }
    }

    author
}
