//! NoteSync binary entrypoint kept minimal. The full runtime lives in `app`.

mod app;
mod args;
mod error;
mod sources;
mod state;
mod util;

use std::sync::OnceLock;
use std::{fmt, time::SystemTime};

use clap::Parser;

/// Timestamp formatter for the file logger (`YYYY-MM-DD HH:MM:SS`, UTC).
struct NotesyncTimer;

impl tracing_subscriber::fmt::time::FormatTime for NotesyncTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = match SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_secs()).unwrap_or(0),
            Err(_) => 0,
        };
        w.write_str(&crate::util::ts_to_date(Some(secs)))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to a non-blocking file appender, falling back to
/// stderr when the log file cannot be opened.
///
/// Inputs:
/// - `level`: Default level used when `RUST_LOG` is unset
fn init_logging(level: &str) {
    let mut log_path = crate::util::paths::logs_dir();
    log_path.push("notesync.log");
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(NotesyncTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(NotesyncTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let parsed = args::Args::parse();
    init_logging(args::determine_log_level(&parsed));

    if parsed.clear_state {
        let path = app::runtime::state_file();
        match std::fs::remove_file(&path) {
            Ok(()) => println!("removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                println!("no persisted state at {}", path.display());
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to remove state file");
                eprintln!("failed to remove {}: {e}", path.display());
            }
        }
        return;
    }

    tracing::info!(one_shot = parsed.query.is_some(), "NoteSync suggestion engine starting");
    if let Err(err) = app::run(parsed.query).await {
        tracing::error!(error = ?err, "Application error");
    }
    tracing::info!("NoteSync suggestion engine exited");
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a non-empty timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives some content
    #[test]
    fn notesync_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::NotesyncTimer;
        let _ = t.format_time(&mut writer);
        assert!(!buf.is_empty());
    }
}
