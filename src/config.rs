use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable consulted first for the API key.
pub(crate) const ENV_KEY: &str = "OPENWEATHERMAP_API_KEY";

/// Fallback key file, resolved against the process working directory.
pub(crate) const KEY_FILE: &str = ".api.txt";

/// Resolves the API key using (in order of precedence):
/// - an explicit `key` argument
/// - the `OPENWEATHERMAP_API_KEY` environment variable, used verbatim
/// - the contents of `./.api.txt`, trimmed
///
/// The file step never fails on its own: a missing or unreadable file just
/// yields nothing. Only when every source comes up empty does resolution
/// fail, with an error naming both ambient sources.
pub(crate) fn resolve_api_key(key: Option<String>) -> Result<String> {
    key.or_else(|| std::env::var(ENV_KEY).ok().filter(|v| !v.is_empty()))
        .or_else(|| read_key_file(Path::new(KEY_FILE)))
        .ok_or(Error::MissingApiKey)
}

/// Reads a key file, trimming surrounding whitespace. Returns `None` for a
/// missing, unreadable or blank file.
fn read_key_file(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let key = contents.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
