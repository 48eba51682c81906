//! Logging configuration.

use std::path::PathBuf;
use std::str::FromStr;

/// Overrides the log filter with an `EnvFilter` directive.
pub const LOG_FILTER_ENV: &str = "GITNOTES_LOG";
/// Selects the log format: `compact`, `pretty` or `json`.
pub const LOG_FORMAT_ENV: &str = "GITNOTES_LOG_FORMAT";
/// Appends logs to a file instead of stderr.
pub const LOG_FILE_ENV: &str = "GITNOTES_LOG_FILE";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Multi-line human readable output with span context.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `gitnotes=debug`.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds the configuration from the process environment.
    ///
    /// `debug` raises the default level to `debug`; an explicit
    /// `GITNOTES_LOG` directive still wins.
    #[must_use]
    pub fn from_env(debug: bool) -> Self {
        Self::from_lookup(debug, |name| std::env::var(name).ok())
    }

    /// Builds the configuration from variables resolved by `lookup`.
    #[must_use]
    pub fn from_lookup<F>(debug: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let filter = non_empty(LOG_FILTER_ENV)
            .unwrap_or_else(|| if debug { "debug" } else { "info" }.to_string());
        // An unknown format is not worth failing the command over
        let format = non_empty(LOG_FORMAT_ENV)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let file = non_empty(LOG_FILE_ENV).map(PathBuf::from);

        Self {
            filter,
            format,
            file,
        }
    }
}
