//! Configuration management.
//!
//! Settings live in a flat `key=value` file, `~/.config/gitnotes/gn.conf` by
//! default. A commented default file is written on first run.
//!
//! | Key | Meaning | Default |
//! |-----|---------|---------|
//! | `editor` | Program used to edit notes | `vi` |
//! | `notes` | Notes repository location | `$HOME/gitnotes` |
//! | `always-commit` | Commit after every edit (`true` enables) | `false` |
//!
//! Unknown keys are ignored.

mod parser;

pub use parser::expand_env;

use crate::models::DEFAULT_EDITOR;
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Contents written when no config file exists.
pub const DEFAULT_CONFIG: &str = include_str!("gn.conf");

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "gn.conf";

/// Main configuration for gitnotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitnotesConfig {
    /// Program used to edit notes.
    pub editor: String,
    /// Location of the notes repository.
    pub notes_path: PathBuf,
    /// Commit after every edit session.
    pub always_commit: bool,
    /// File the configuration was loaded from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Default for GitnotesConfig {
    fn default() -> Self {
        let notes_path = directories::BaseDirs::new().map_or_else(
            || PathBuf::from("gitnotes"),
            |dirs| dirs.home_dir().join("gitnotes"),
        );
        Self {
            editor: DEFAULT_EDITOR.to_string(),
            notes_path,
            always_commit: false,
            source: None,
        }
    }
}

impl GitnotesConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default config file location, `~/.config/gitnotes/gn.conf`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| {
            dirs.home_dir()
                .join(".config")
                .join("gitnotes")
                .join(CONFIG_FILE_NAME)
        })
    }

    /// Loads configuration from the default location.
    ///
    /// Falls back to built-in defaults when no home directory is known.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or read.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("no home directory, using built-in configuration");
                Ok(Self::default())
            },
        }
    }

    /// Loads configuration from a file path, creating it with
    /// [`DEFAULT_CONFIG`] if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or read.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            create_config_file(path)?;
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::from_io("read_config_file", path, &e))?;

        let mut config = Self::parse(&contents, parser::process_env);
        config.source = Some(path.to_path_buf());
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses config file contents on top of the defaults.
    ///
    /// `lookup` resolves environment references in values.
    #[must_use]
    pub fn parse<F>(contents: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        for line in contents.lines() {
            let Some((key, value)) = parser::parse_line(line, &lookup) else {
                continue;
            };
            match key {
                "editor" => config.editor = value,
                "notes" => config.notes_path = PathBuf::from(value),
                "always-commit" => config.always_commit = value == "true",
                _ => debug!(key, "ignoring unknown config key"),
            }
        }

        config
    }

    /// Sets the notes path.
    #[must_use]
    pub fn with_notes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.notes_path = path.into();
        self
    }

    /// Sets the editor.
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }
}

/// Writes [`DEFAULT_CONFIG`] to `path`, creating owner-only parent
/// directories.
fn create_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_private_dir(parent).map_err(|e| Error::from_io("create_config_dir", parent, &e))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| Error::from_io("create_config_file", path, &e))?;
    info!(path = %path.display(), "created default configuration");
    Ok(())
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}
