//! Config command handler.
//!
//! Contains the implementation of the `config` and `completions` CLI
//! commands.

use clap::CommandFactory;
use clap_complete::Shell;
use gitnotes::config::GitnotesConfig;
use std::fmt::Write as _;

/// Config command.
pub fn cmd_config(config: &GitnotesConfig, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", render_config(config));
    }
    Ok(())
}

/// Completions command.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn render_config(config: &GitnotesConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Configuration");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out);
    match &config.source {
        Some(source) => {
            let _ = writeln!(out, "Config File: {}", source.display());
        },
        None => {
            let _ = writeln!(out, "Config File: (none - using defaults)");
        },
    }
    let _ = writeln!(out, "Editor: {}", config.editor);
    let _ = writeln!(out, "Notes Path: {}", config.notes_path.display());
    let _ = writeln!(out, "Always Commit: {}", config.always_commit);
    out
}
