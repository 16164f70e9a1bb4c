//! Suggestion engine state: value types, the bounded FIFO cache, and the
//! coordinator that owns the request lifecycle.

/// Bounded FIFO mapping from normalized query to capped suggestion lists.
pub mod cache;
/// Request lifecycle owner: cache policy, cancellation, last-request-wins.
pub mod coordinator;
/// Core value types shared across the engine.
pub mod types;

pub use cache::{CACHE_CAP, SuggestionCache};
pub use coordinator::{SUGGESTION_CAP, SuggestionCoordinator, dedup_and_cap};
pub use types::{QueryInput, Suggestion, SuggestionOutcome, VideoHit};
