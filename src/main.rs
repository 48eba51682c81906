//! Binary entry point for gitnotes.
//!
//! This binary provides the `gn` command line interface.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{NoteTarget, RemoteArgs};
use gitnotes::config::GitnotesConfig;
use gitnotes::git::read_global_author;
use gitnotes::observability::{self, LoggingConfig};
use gitnotes::Session;
use std::path::PathBuf;
use std::process::ExitCode;

/// gitnotes - notes for every project and branch, kept in git.
#[derive(Parser)]
#[command(name = "gn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true, visible_alias = "verbose")]
    debug: bool,

    /// Path to configuration file.
    #[arg(long, global = true, env = "GITNOTES_CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Open the note of the current project and branch in an editor.
    Edit {
        /// Editor to use instead of the configured one.
        #[arg(short, long)]
        editor: Option<String>,

        #[command(flatten)]
        target: NoteTarget,
    },

    /// Print the note of the current project and branch.
    #[command(visible_alias = "read")]
    Print {
        #[command(flatten)]
        target: NoteTarget,
    },

    /// Delete the note of the current project and branch.
    Delete {
        #[command(flatten)]
        target: NoteTarget,
    },

    /// Commit all changes in the notes repository.
    Commit {
        /// Commit message (default: "Update notes - <timestamp>").
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Commit and push notes to the remote.
    Push {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Pull notes from the remote.
    Pull {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Print the notes repository path.
    Path,

    /// Show the effective configuration.
    Config {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = observability::init(&LoggingConfig::from_env(cli.debug)) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: GitnotesConfig) -> anyhow::Result<()> {
    match command {
        Commands::Edit { editor, target } => {
            commands::cmd_edit(committing_session(&config), editor, target)
        },
        Commands::Print { target } => commands::cmd_print(base_session(&config), target),
        Commands::Delete { target } => commands::cmd_delete(base_session(&config), target),
        Commands::Commit { message } => commands::cmd_commit(committing_session(&config), message),
        Commands::Push { remote } => commands::cmd_push(committing_session(&config), remote),
        Commands::Pull { remote } => commands::cmd_pull(committing_session(&config), remote),
        Commands::Path => commands::cmd_path(base_session(&config)),
        Commands::Config { json } => commands::cmd_config(&config, json),
        Commands::Completions { shell } => {
            commands::cmd_completions(shell);
            Ok(())
        },
    }
}

/// Loads configuration from `path`, or from the default location.
fn load_config(path: Option<&std::path::Path>) -> gitnotes::Result<GitnotesConfig> {
    match path.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => GitnotesConfig::load_from_file(path),
        None => GitnotesConfig::load_default(),
    }
}

/// Builds the session shared by every command; command flags are applied on
/// top of it.
fn base_session(config: &GitnotesConfig) -> Session {
    Session::from_config(config)
}

/// Builds a session for commands that may create commits.
fn committing_session(config: &GitnotesConfig) -> Session {
    base_session(config).with_author(read_global_author())
}
