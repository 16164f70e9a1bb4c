//! Command-line argument definition and handling.

use clap::Parser;

/// NoteSync suggestion engine command line.
#[derive(Parser, Debug)]
#[command(name = "notesync")]
#[command(version)]
#[command(
    about = "Video search suggestions with a bounded FIFO cache and request cancellation",
    long_about = None
)]
pub struct Args {
    /// Resolve a single query, print its suggestions, and exit
    #[arg(short, long)]
    pub query: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Delete the persisted suggestion state and exit
    #[arg(long)]
    pub clear_state: bool,
}

/// What: Determine the effective log level from parsed arguments.
///
/// Inputs:
/// - `args`: Parsed command line
///
/// Output:
/// - `"debug"` when `--verbose` is set, otherwise the `--log-level` value.
#[must_use]
pub fn determine_log_level(args: &Args) -> &str {
    if args.verbose { "debug" } else { &args.log_level }
}
