//! Settings file parsing.
//!
//! Settings live in `$CONFIG/notesync.conf` as simple `key = value` lines.
//! Missing files and unknown keys are tolerated; every field has a default
//! so the engine starts without any configuration present.

use std::path::Path;

use crate::util::paths;

/// Default API endpoint queried for video search.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3";
/// Default `maxResults` requested from the provider per search.
pub const DEFAULT_MAX_RESULTS: u32 = 10;
/// Default debounce window applied to raw input, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// What: Check whether a settings line should be skipped.
///
/// Inputs:
/// - `line`: Raw line from the settings file
///
/// Output:
/// - `true` for empty lines and `#`, `//`, or `;` comments.
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse one `key = value` line.
///
/// Inputs:
/// - `line`: Line to parse
///
/// Output:
/// - `Some((key, value))` with both sides trimmed; `None` without an `=`.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let mut parts = trimmed.splitn(2, '=');
    let key = parts.next()?.trim().to_string();
    let value = parts.next()?.trim().to_string();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Runtime settings for the suggestion engine.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Provider API key; empty means unauthenticated (requests will fail
    /// against the real API but work against local stand-ins).
    pub api_key: String,
    /// Provider base URL.
    pub endpoint: String,
    /// `maxResults` requested per provider search.
    pub max_results: u32,
    /// Debounce window for raw input, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Settings {
    /// What: Load settings from the default config location.
    ///
    /// Output:
    /// - Parsed settings; defaults when the file is absent. The
    ///   `NOTESYNC_API_KEY` environment variable overrides the file's key.
    #[must_use]
    pub fn load() -> Self {
        let path = paths::config_dir().join("notesync.conf");
        let mut settings = Self::load_from(&path);
        if let Ok(key) = std::env::var("NOTESYNC_API_KEY")
            && !key.trim().is_empty()
        {
            settings.api_key = key.trim().to_string();
        }
        settings
    }

    /// What: Load settings from a specific file path.
    ///
    /// Inputs:
    /// - `path`: Settings file location
    ///
    /// Output:
    /// - Settings with recognized keys applied over defaults; unparseable
    ///   values keep their default and log a warning.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let mut settings = Self::default();
        let Ok(body) = std::fs::read_to_string(path) else {
            return settings;
        };
        for line in body.lines() {
            if skip_comment_or_empty(line) {
                continue;
            }
            let Some((key, value)) = parse_key_value(line) else {
                continue;
            };
            match key.as_str() {
                "api_key" => settings.api_key = value,
                "endpoint" => {
                    if !value.is_empty() {
                        settings.endpoint = value;
                    }
                }
                "max_results" => match value.parse::<u32>() {
                    Ok(n) if n > 0 => settings.max_results = n,
                    _ => {
                        tracing::warn!(value = %value, "[Config] Invalid max_results; keeping default");
                    }
                },
                "debounce_ms" => match value.parse::<u64>() {
                    Ok(n) => settings.debounce_ms = n,
                    Err(_) => {
                        tracing::warn!(value = %value, "[Config] Invalid debounce_ms; keeping default");
                    }
                },
                other => {
                    tracing::debug!(key = %other, "[Config] Ignoring unknown settings key");
                }
            }
        }
        settings
    }
}
