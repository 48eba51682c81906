//! Repository command handlers.

use super::RemoteArgs;
use gitnotes::git::{PullOutcome, PushOutcome};
use gitnotes::{Error, NotesService, Session};
use std::io::{BufRead, Write};

/// Commit command.
pub fn cmd_commit(session: Session, message: Option<String>) -> anyhow::Result<()> {
    let session = match message {
        Some(message) => session.with_commit_message(message),
        None => session,
    };
    match NotesService::new(session).commit()? {
        Some(oid) => println!("Committed {oid}"),
        None => println!("Nothing to commit"),
    }
    Ok(())
}

/// Push command.
///
/// Without a remote, asks for its URL, registers it and retries once.
pub fn cmd_push(session: Session, remote: RemoteArgs) -> anyhow::Result<()> {
    let service = NotesService::new(with_url(session, remote));

    let outcome = match service.push() {
        Err(e) if e.is_missing_remote() => {
            let stdin = std::io::stdin();
            let Some(url) = prompt_remote_url(&mut stdin.lock(), &mut std::io::stdout())? else {
                return Err(e.into());
            };
            service.add_origin(&url)?;
            service.push()?
        },
        other => other?,
    };

    match outcome {
        PushOutcome::Pushed => println!("Notes pushed"),
        PushOutcome::NothingToPush => println!("Nothing to push yet"),
    }
    Ok(())
}

/// Pull command.
pub fn cmd_pull(session: Session, remote: RemoteArgs) -> anyhow::Result<()> {
    let service = NotesService::new(with_url(session, remote));

    let outcome = match service.pull() {
        Err(e @ Error::NoRemoteConfigured { .. }) => {
            eprintln!("No remote configured. Run the pull command with -u [url] to set one.");
            return Err(e.into());
        },
        other => other?,
    };

    match outcome {
        PullOutcome::UpToDate => println!("Already up to date"),
        PullOutcome::FastForward => println!("Notes updated"),
        PullOutcome::Merged => println!("Notes merged"),
    }
    Ok(())
}

fn with_url(session: Session, remote: RemoteArgs) -> Session {
    match remote.url {
        Some(url) => session.with_remote_url(url),
        None => session,
    }
}

/// Asks for a remote URL.
///
/// Returns `None` when the input is closed or the answer is blank.
fn prompt_remote_url<R, W>(input: &mut R, output: &mut W) -> std::io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Remote not found. Enter remote URL: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let url = line.trim();
    Ok((!url.is_empty()).then(|| url.to_string()))
}
