//! Error taxonomy for suggestion lookups.
//!
//! Failures split along the only seam that matters to the coordinator: the
//! request never completed (`Provider`), or it completed with a body the
//! parser could not use (`Payload`). Cancellation is not an error and has
//! no variant here; aborted requests simply report nothing.

/// Failure reported by a search provider.
///
/// Carried inside [`crate::state::SuggestionOutcome`] and surfaced on the
/// coordinator as its `error` field, so it stays cheap to clone and compare.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    /// The request could not be sent or came back with an error status.
    #[error("provider request failed: {0}")]
    Provider(String),
    /// The response arrived but its body was not the expected shape.
    #[error("provider returned malformed payload: {0}")]
    Payload(String),
}
