//! Directory resolution for config, persisted state, and logs.
//!
//! Prefers `$HOME/.config/notesync`, falling back to the matching XDG base
//! directory variables. All helpers ensure the directory exists before
//! returning it.

use std::env;
use std::path::{Path, PathBuf};

/// What: Resolve an XDG base directory with a home-relative fallback.
///
/// Inputs:
/// - `var`: XDG environment variable name (e.g. `XDG_CONFIG_HOME`)
/// - `fallback`: Path segments under `$HOME` used when the variable is unset
///
/// Output:
/// - Base directory path; relative to the current directory when even HOME
///   is unavailable.
fn xdg_base_dir(var: &str, fallback: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(var)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    let mut base = env::var("HOME").map_or_else(|_| PathBuf::from("."), PathBuf::from);
    for part in fallback {
        base.push(part);
    }
    base
}

/// Return `$HOME/.config/notesync` when HOME is set and creatable.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("notesync");
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// Config directory for NoteSync (ensured to exist).
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let dir = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("notesync");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// State directory under config: `.../notesync/state` (ensured to exist).
#[must_use]
pub fn state_dir() -> PathBuf {
    let dir = config_dir().join("state");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `.../notesync/logs` (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
