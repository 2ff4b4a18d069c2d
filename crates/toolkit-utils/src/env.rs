//! Environment configuration helpers

use std::path::PathBuf;

/// Load variables from a `.env` file in the current directory or its parents
///
/// Variables already present in the process environment win. Returns the
/// path of the file that was loaded, or `None` if there was nothing to load.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        },
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Failed to load .env file: {e}");
            None
        },
    }
}

/// Read an environment variable, treating unset, non-UTF-8 and blank values as absent
///
/// The value is read at call time, so variables set after startup are seen.
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
