//! Interactive note editing.

use crate::models::DEFAULT_EDITOR;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

/// Creates the note if it is absent, without touching existing content.
///
/// # Errors
///
/// Returns [`Error::NotAuthorized`] on permission failures and
/// [`Error::OperationFailed`] for other filesystem errors.
pub fn touch_note(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| Error::from_io("open_note", path, &e))
}

/// Runs `editor` on `path` and waits for it to exit.
///
/// The editor inherits the terminal. `editor` may carry arguments, as in
/// `code --wait`; the note path is appended last. A blank `editor` runs
/// [`DEFAULT_EDITOR`].
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the editor cannot be started or
/// exits unsuccessfully.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn launch(editor: &str, path: &Path) -> Result<()> {
    let (program, parts) = editor_command(editor);

    debug!(program, "starting editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::operation("launch_editor", format!("{program}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::operation(
            "launch_editor",
            format!("{program} exited with {status}"),
        ))
    }
}

/// Splits an editor string into the program and its arguments.
fn editor_command(editor: &str) -> (&str, Vec<&str>) {
    let mut parts = editor.split_whitespace();
    match parts.next() {
        Some(program) => (program, parts.collect()),
        None => (DEFAULT_EDITOR, Vec::new()),
    }
}
