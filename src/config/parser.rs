//! `key=value` config file parsing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches `$NAME` and `${NAME}`.
// Allow expect() on a static pattern that is known to compile
#[allow(clippy::expect_used)]
static ENV_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("static regex: environment variable reference")
});

/// Splits a config line into key and cleaned value.
///
/// Returns `None` for lines without `=`. The value is cut at the first `#`,
/// trimmed, and has environment references expanded through `lookup`.
pub fn parse_line<F>(line: &str, lookup: F) -> Option<(&str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.starts_with('#') {
        return None;
    }
    Some((key, clean_value(value, lookup)))
}

/// Strips a trailing comment, trims, and expands environment references.
pub fn clean_value<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let value = value.split('#').next().unwrap_or_default().trim();
    expand_env(value, lookup)
}

/// Replaces `$NAME` and `${NAME}` with values from `lookup`.
///
/// Unknown variables expand to the empty string.
pub fn expand_env<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ENV_VAR
        .replace_all(value, |caps: &Captures<'_>| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .and_then(|name| lookup(name.as_str()))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Looks up a variable in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
