//! Note command handlers.

use super::NoteTarget;
use gitnotes::{NotesService, Session};
use std::io::Write;

/// Edit command.
pub fn cmd_edit(
    session: Session,
    editor: Option<String>,
    target: NoteTarget,
) -> anyhow::Result<()> {
    let mut session = target.apply(session)?;
    if let Some(editor) = editor {
        session = session.with_editor(editor);
    }
    NotesService::new(session).edit()?;
    Ok(())
}

/// Print command.
pub fn cmd_print(session: Session, target: NoteTarget) -> anyhow::Result<()> {
    let content = NotesService::new(target.apply(session)?).read_note()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Delete command.
pub fn cmd_delete(session: Session, target: NoteTarget) -> anyhow::Result<()> {
    let service = NotesService::new(target.apply(session)?);
    service.delete()?;
    let location = service.location()?;
    println!("Deleted note for {location}");
    Ok(())
}

/// Path command.
pub fn cmd_path(session: Session) -> anyhow::Result<()> {
    println!("{}", NotesService::new(session).path().display());
    Ok(())
}
