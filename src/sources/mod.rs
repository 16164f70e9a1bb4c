//! Video search providers consumed by the suggestion coordinator.
//!
//! A provider turns a keyword into an ordered list of [`VideoHit`] records.
//! Cooperative cancellation is not a provider concern: the coordinator wraps
//! the returned future in an abortable handle and retires it at the one
//! await point when the request is superseded or cleared.

/// YouTube Data API v3 search provider.
pub mod youtube;

use futures::future::BoxFuture;

use crate::error::SuggestError;
use crate::state::VideoHit;

pub use youtube::YouTubeProvider;

/// Keyword search against a remote video catalog.
///
/// Implementations must be cheap to call and must not retry internally; each
/// keystroke-triggered call simply supersedes the last. An empty result list
/// is a valid "no matches" answer, distinct from an `Err`.
pub trait SearchProvider: Send + Sync {
    /// What: Issue a keyword search and resolve to raw video hits.
    ///
    /// Inputs:
    /// - `term`: Normalized (trimmed, non-empty) query text
    ///
    /// Output:
    /// - Future resolving to hits in provider rank order, or a
    ///   [`SuggestError`] on transport or payload failure.
    fn search(&self, term: &str) -> BoxFuture<'static, Result<Vec<VideoHit>, SuggestError>>;
}
