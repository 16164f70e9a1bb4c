//! Narrow-view persistence of coordinator state.
//!
//! Only `{query, suggestions, last_resolved, cache}` survive a restart.
//! The view type simply has no `loading` or `error` fields, so their
//! exclusion is a property of the type rather than a runtime convention;
//! rehydration always yields `loading = false` and `error = None`.

use std::fs;
use std::path::Path;

use crate::state::{Suggestion, SuggestionCache, SuggestionCoordinator};

/// Serialized subset of coordinator state.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PersistedView {
    /// Normalized text of the most recent non-empty request.
    pub query: String,
    /// Published suggestion list at flush time.
    pub suggestions: Vec<Suggestion>,
    /// Query the persisted `suggestions` answer.
    pub last_resolved: String,
    /// Bounded FIFO query cache, order preserved.
    pub cache: SuggestionCache,
}

impl PersistedView {
    /// What: Capture the persisted subset from a live coordinator.
    ///
    /// Inputs:
    /// - `coord`: Coordinator to snapshot
    ///
    /// Output:
    /// - View holding clones of the four persisted fields.
    #[must_use]
    pub fn capture(coord: &SuggestionCoordinator) -> Self {
        Self {
            query: coord.query.clone(),
            suggestions: coord.suggestions.clone(),
            last_resolved: coord.last_resolved.clone(),
            cache: coord.cache().clone(),
        }
    }

    /// What: Rehydrate a coordinator from this view.
    ///
    /// Inputs:
    /// - `coord`: Freshly constructed coordinator to restore into
    pub fn apply(self, coord: &mut SuggestionCoordinator) {
        coord.restore(self.query, self.suggestions, self.last_resolved, self.cache);
    }
}

/// What: Persist coordinator state to disk if marked dirty.
///
/// Inputs:
/// - `coord`: Coordinator whose dirty flag and state are used
/// - `path`: Target state file
///
/// Output:
/// - Writes the view as JSON and clears the dirty flag on serialization
///   success; write failures are logged and not retried.
pub fn maybe_flush_state(coord: &mut SuggestionCoordinator, path: &Path) {
    if !coord.is_dirty() {
        return;
    }
    let view = PersistedView::capture(coord);
    if let Ok(body) = serde_json::to_string(&view) {
        tracing::debug!(
            path = %path.display(),
            bytes = body.len(),
            "[Persist] Writing suggestion state to disk"
        );
        match fs::write(path, &body) {
            Ok(()) => {
                tracing::trace!(path = %path.display(), "[Persist] Suggestion state persisted");
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "[Persist] Failed to write suggestion state"
                );
            }
        }
        coord.mark_clean();
    }
}

/// What: Load persisted state from disk.
///
/// Inputs:
/// - `path`: State file location
///
/// Output:
/// - `Some(PersistedView)` on success; `None` for a missing or corrupt file
///   (corruption is logged and the engine starts empty).
#[must_use]
pub fn load_state(path: &Path) -> Option<PersistedView> {
    let body = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&body) {
        Ok(view) => Some(view),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "[Persist] Ignoring corrupt suggestion state file"
            );
            None
        }
    }
}
