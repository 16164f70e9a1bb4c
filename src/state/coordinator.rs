//! Suggestion request lifecycle: cache policy, cooperative cancellation,
//! and last-request-wins ordering.
//!
//! The coordinator is the only entry point callers use to turn free-text
//! input into suggestion lists. It is owned by the composition root and
//! mutated from a single logical thread; interleavings with spawned
//! provider calls are resolved by the request-id check in
//! [`SuggestionCoordinator::apply_outcome`], not by locks.

use std::sync::Arc;

use futures::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;

use crate::error::SuggestError;
use crate::sources::SearchProvider;

use super::cache::SuggestionCache;
use super::types::{Suggestion, SuggestionOutcome, VideoHit};

/// Maximum number of suggestions published for a single query.
pub const SUGGESTION_CAP: usize = 5;

/// Marker for the one provider call currently considered live.
struct ActiveRequest {
    /// Identifier the settling outcome must echo to be honored.
    id: u64,
    /// Handle that aborts the in-flight call at its await point.
    abort: AbortHandle,
}

/// Owner of the active query, in-flight request lifecycle, and cache policy.
///
/// State fields (`query`, `suggestions`, `loading`, `error`,
/// `last_resolved`) are public for callers to render reactively; all
/// mutation goes through [`request_suggestions`](Self::request_suggestions),
/// [`apply_outcome`](Self::apply_outcome), and the auxiliary clear/cancel
/// operations. None of them ever returns an error.
pub struct SuggestionCoordinator {
    /// Normalized text of the most recent non-empty request.
    pub query: String,
    /// Currently published suggestion list (at most [`SUGGESTION_CAP`]).
    pub suggestions: Vec<Suggestion>,
    /// Whether a provider call is in flight for the current query.
    pub loading: bool,
    /// Failure surfaced by the most recent settled request, if any.
    pub error: Option<SuggestError>,
    /// Query the current `suggestions` value answers; guards against
    /// flashing stale results while a new request is in flight.
    pub last_resolved: String,
    /// Bounded FIFO query cache; written only by this coordinator.
    cache: SuggestionCache,
    /// Injected search provider (composition-root dependency).
    provider: Arc<dyn SearchProvider>,
    /// Channel the spawned provider tasks report settled outcomes on.
    outcome_tx: mpsc::UnboundedSender<SuggestionOutcome>,
    /// Monotonic request id source.
    next_request_id: u64,
    /// Marker for the in-flight call, if any.
    active: Option<ActiveRequest>,
    /// Set whenever persisted state (query/suggestions/last_resolved/cache)
    /// changes since the last flush.
    dirty: bool,
}

impl SuggestionCoordinator {
    /// What: Build an idle coordinator around an injected provider.
    ///
    /// Inputs:
    /// - `provider`: Search provider the engine issues calls against
    /// - `outcome_tx`: Sender the owning event loop drains for settled calls
    ///
    /// Output:
    /// - Coordinator in the fully idle state with an empty cache.
    #[must_use]
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        outcome_tx: mpsc::UnboundedSender<SuggestionOutcome>,
    ) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            loading: false,
            error: None,
            last_resolved: String::new(),
            cache: SuggestionCache::default(),
            provider,
            outcome_tx,
            next_request_id: 0,
            active: None,
            dirty: false,
        }
    }

    /// What: Handle a free-text search term; the single public entry point.
    ///
    /// Inputs:
    /// - `term`: Arbitrary text; normalized by trimming, no length bound
    ///
    /// Output:
    /// - No return value; state mutates and, on a cache miss, a provider
    ///   call is issued whose outcome arrives via the outcome channel.
    ///
    /// Details:
    /// - Empty trimmed input cancels in-flight work and resets to idle
    ///   without touching the provider.
    /// - A cache hit publishes the cached list synchronously with zero
    ///   network calls.
    /// - A miss cancels any previous in-flight call (last request wins) and
    ///   issues a fresh abortable call.
    pub fn request_suggestions(&mut self, term: &str) {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            self.cancel_request();
            if !self.is_idle() {
                self.reset_idle();
            }
            return;
        }

        if let Some(cached) = self.cache.get(trimmed) {
            let cached = cached.to_vec();
            self.cancel_request();
            let already_current = self.last_resolved == trimmed
                && self.suggestions == cached
                && !self.loading
                && self.error.is_none();
            if self.query != trimmed {
                self.query = trimmed.to_string();
                self.dirty = true;
            }
            if already_current {
                return;
            }
            tracing::debug!(term = %trimmed, "[Suggest] Serving cached suggestions");
            self.suggestions = cached;
            self.last_resolved = trimmed.to_string();
            self.loading = false;
            self.error = None;
            self.dirty = true;
            return;
        }

        self.cancel_request();
        if self.query != trimmed {
            self.query = trimmed.to_string();
            self.dirty = true;
        }
        // Avoid redundant state churn when already loading without a prior error.
        if !self.loading || self.error.is_some() {
            self.loading = true;
            self.error = None;
        }

        let id = self.next_request_id;
        self.next_request_id += 1;
        let (abort, registration) = AbortHandle::new_pair();
        let call = Abortable::new(self.provider.search(trimmed), registration);
        let tx = self.outcome_tx.clone();
        let term_owned = trimmed.to_string();
        tracing::debug!(term = %term_owned, request_id = id, "[Suggest] Issuing provider request");
        tokio::spawn(async move {
            match call.await {
                Ok(result) => {
                    let _ = tx.send(SuggestionOutcome {
                        id,
                        term: term_owned,
                        result,
                    });
                }
                // Aborted means superseded or explicitly cleared; the
                // successor owns the state, so report nothing.
                Err(_aborted) => {}
            }
        });
        self.active = Some(ActiveRequest { id, abort });
    }

    /// What: Apply a settled provider call to coordinator state.
    ///
    /// Inputs:
    /// - `outcome`: Settled call delivered by the outcome channel
    ///
    /// Output:
    /// - On the current request: publishes suggestions or the error and
    ///   clears the active marker. Superseded outcomes are discarded whole.
    ///
    /// Details:
    /// - Success post-processing: drop empty titles, dedup by title
    ///   (case-sensitive, first-seen wins), cap at [`SUGGESTION_CAP`], then
    ///   write through to the cache before publishing.
    pub fn apply_outcome(&mut self, outcome: SuggestionOutcome) {
        let current = self.active.as_ref().is_some_and(|a| a.id == outcome.id);
        if !current {
            tracing::trace!(
                term = %outcome.term,
                request_id = outcome.id,
                "[Suggest] Discarding superseded response"
            );
            return;
        }
        self.active = None;

        match outcome.result {
            Ok(hits) => {
                let list = dedup_and_cap(&hits);
                tracing::debug!(
                    term = %outcome.term,
                    hits = hits.len(),
                    published = list.len(),
                    "[Suggest] Provider request resolved"
                );
                self.cache.insert(&outcome.term, list.clone());
                self.suggestions = list;
                self.loading = false;
                self.error = None;
                self.last_resolved = outcome.term;
                self.dirty = true;
            }
            Err(e) => {
                tracing::warn!(term = %outcome.term, error = %e, "[Suggest] Provider request failed");
                self.suggestions.clear();
                self.loading = false;
                self.error = Some(e);
                self.dirty = true;
            }
        }
    }

    /// What: Cancel in-flight work and reset to the idle state.
    ///
    /// Output:
    /// - Idle coordinator; no-op when already fully idle.
    pub fn clear_suggestions(&mut self) {
        self.cancel_request();
        if !self.is_idle() {
            self.reset_idle();
        }
    }

    /// What: Cancel in-flight work without touching any other state field.
    ///
    /// Details:
    /// - Aborting a call that has already settled is a no-op.
    pub fn cancel_request(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::trace!(request_id = active.id, "[Suggest] Cancelling in-flight request");
            active.abort.abort();
        }
    }

    /// Whether every state field holds its idle value.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.query.is_empty()
            && self.suggestions.is_empty()
            && !self.loading
            && self.error.is_none()
            && self.last_resolved.is_empty()
    }

    /// Reset all state fields to their idle values and mark state dirty.
    fn reset_idle(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.loading = false;
        self.error = None;
        self.last_resolved.clear();
        self.dirty = true;
    }

    /// Read access to the query cache (mutation stays inside the coordinator).
    #[must_use]
    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    /// What: Restore the persisted state subset after a process restart.
    ///
    /// Inputs:
    /// - `query`, `suggestions`, `last_resolved`, `cache`: Narrowed view
    ///   captured at the last flush
    ///
    /// Details:
    /// - `loading` and `error` are not part of the view; no request can
    ///   survive a restart, so they keep their idle values.
    pub fn restore(
        &mut self,
        query: String,
        suggestions: Vec<Suggestion>,
        last_resolved: String,
        cache: SuggestionCache,
    ) {
        self.query = query;
        self.suggestions = suggestions;
        self.last_resolved = last_resolved;
        self.cache = cache;
        self.loading = false;
        self.error = None;
        self.active = None;
        self.dirty = false;
    }

    /// Whether persisted state changed since the last flush.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a flush attempt.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// What: Post-process raw provider hits into a publishable suggestion list.
///
/// Inputs:
/// - `hits`: Provider results in response order
///
/// Output:
/// - At most [`SUGGESTION_CAP`] suggestions with unique, non-empty titles in
///   first-seen order.
///
/// Details:
/// - Title comparison is case-sensitive exact match; the first occurrence
///   wins and later duplicates are dropped before the cap applies.
#[must_use]
pub fn dedup_and_cap(hits: &[VideoHit]) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = Vec::with_capacity(SUGGESTION_CAP);
    for hit in hits {
        if hit.title.is_empty() {
            continue;
        }
        if out.iter().any(|s| s.title == hit.title) {
            continue;
        }
        out.push(Suggestion::from_hit(hit));
        if out.len() == SUGGESTION_CAP {
            break;
        }
    }
    out
}
