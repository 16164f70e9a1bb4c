//! Interactive runtime: reads query lines from stdin, debounces them, and
//! drives the suggestion coordinator.
//!
//! This is the composition root. It owns the coordinator (and therefore all
//! mutable state), wires in the provider and persistence, and is the single
//! consumer of the outcome channel.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

use super::persist;
use crate::sources::{SearchProvider, YouTubeProvider};
use crate::state::{QueryInput, SuggestionCoordinator};
use crate::util::config::Settings;
use crate::util::paths;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Location of the persisted suggestion state file.
#[must_use]
pub fn state_file() -> PathBuf {
    paths::state_dir().join("suggestions.json")
}

/// What: Spawn the stdin reader feeding raw query lines into the engine.
///
/// Inputs:
/// - `raw_tx`: Channel the reader sends each line on, tagged with a
///   monotonic sequence number
///
/// Details:
/// - Ends (dropping the sender) on EOF, which shuts the pipeline down.
fn spawn_input_reader(raw_tx: mpsc::UnboundedSender<QueryInput>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut next_id: u64 = 0;
        while let Ok(Some(line)) = lines.next_line().await {
            next_id += 1;
            if raw_tx.send(QueryInput { id: next_id, text: line }).is_err() {
                break;
            }
        }
    });
}

/// What: Spawn the debouncing query worker.
///
/// Inputs:
/// - `raw_rx`: Raw input lines from the reader
/// - `debounced_tx`: Channel receiving only the latest line per window
/// - `debounce_ms`: Quiet window before a line is forwarded
///
/// Details:
/// - Coalesces bursts: while new lines keep arriving inside the window,
///   only the newest survives. A zero window forwards immediately.
pub fn spawn_query_worker(
    mut raw_rx: mpsc::UnboundedReceiver<QueryInput>,
    debounced_tx: mpsc::UnboundedSender<QueryInput>,
    debounce_ms: u64,
) {
    tokio::spawn(async move {
        loop {
            let Some(mut latest) = raw_rx.recv().await else {
                break;
            };
            if debounce_ms > 0 {
                loop {
                    select! {
                        Some(newer) = raw_rx.recv() => {
                            tracing::trace!(
                                superseded = latest.id,
                                by = newer.id,
                                "[Input] Debounce coalesced line"
                            );
                            latest = newer;
                        }
                        () = sleep(Duration::from_millis(debounce_ms)) => { break; }
                    }
                }
            }
            if debounced_tx.send(latest).is_err() {
                break;
            }
        }
    });
}

/// What: Print the coordinator's current answer for the active query.
///
/// Inputs:
/// - `coord`: Coordinator to render
///
/// Details:
/// - An empty list alone is ambiguous between loading, no matches, and
///   errored; all three flags are consulted to disambiguate.
fn render(coord: &SuggestionCoordinator) {
    if coord.loading {
        println!("searching '{}'...", coord.query);
        return;
    }
    if let Some(err) = &coord.error {
        println!("search failed: {err}");
        return;
    }
    if coord.last_resolved.is_empty() {
        return;
    }
    if coord.suggestions.is_empty() {
        println!("no matches for '{}'", coord.last_resolved);
        return;
    }
    println!("suggestions for '{}':", coord.last_resolved);
    for (i, suggestion) in coord.suggestions.iter().enumerate() {
        let id = suggestion.id.as_deref().unwrap_or("-");
        println!(
            "{:>2}. {}  [{}]  ({id})",
            i + 1,
            suggestion.title,
            suggestion.channel_title
        );
    }
}

/// What: Run the suggestion engine end-to-end.
///
/// Inputs:
/// - `one_shot`: When set, resolve this single query, print, persist, exit
///
/// Output:
/// - `Ok(())` on clean shutdown (stdin EOF or one-shot completion).
///
/// Details:
/// - Loads settings, rehydrates persisted state (`loading`/`error` reset by
///   construction), spawns the input reader and debounce worker, then loops:
///   debounced query -> `request_suggestions`; settled outcome ->
///   `apply_outcome`; state flushed whenever dirty.
pub async fn run(one_shot: Option<String>) -> Result<()> {
    let settings = Settings::load();
    let state_path = state_file();

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let provider: Arc<dyn SearchProvider> = Arc::new(YouTubeProvider::new(&settings));
    let mut coord = SuggestionCoordinator::new(provider, outcome_tx);
    if let Some(view) = persist::load_state(&state_path) {
        tracing::info!(path = %state_path.display(), "[Runtime] Restored persisted suggestion state");
        view.apply(&mut coord);
    }

    if let Some(term) = one_shot {
        coord.request_suggestions(&term);
        if coord.loading
            && let Some(outcome) = outcome_rx.recv().await
        {
            coord.apply_outcome(outcome);
        }
        render(&coord);
        persist::maybe_flush_state(&mut coord, &state_path);
        return Ok(());
    }

    let (raw_tx, raw_rx) = mpsc::unbounded_channel();
    let (query_tx, mut query_rx) = mpsc::unbounded_channel();
    spawn_input_reader(raw_tx);
    spawn_query_worker(raw_rx, query_tx, settings.debounce_ms);
    tracing::info!(debounce_ms = settings.debounce_ms, "[Runtime] Interactive loop started");

    loop {
        select! {
            maybe_query = query_rx.recv() => {
                let Some(query) = maybe_query else {
                    // stdin closed; drain nothing further.
                    break;
                };
                coord.request_suggestions(&query.text);
                if !coord.loading {
                    render(&coord);
                }
            }
            Some(outcome) = outcome_rx.recv() => {
                coord.apply_outcome(outcome);
                render(&coord);
            }
        }
        persist::maybe_flush_state(&mut coord, &state_path);
    }

    coord.cancel_request();
    persist::maybe_flush_state(&mut coord, &state_path);
    tracing::info!("[Runtime] Shutting down");
    Ok(())
}
