//! Core value types used by the suggestion engine.

use crate::error::SuggestError;

/// Raw video metadata record as returned by the search provider.
///
/// This is the provider-shaped form; the coordinator derives the leaner
/// [`Suggestion`] from it before anything is cached or published.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VideoHit {
    /// Provider video identifier, when the result carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// Video title as reported by the provider.
    pub title: String,
    /// One-line description suitable for list display.
    pub description: String,
    /// Channel that published the video.
    pub channel_title: String,
    /// Publication timestamp string as reported by the provider.
    pub published_at: String,
    /// Thumbnail URL, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Lightweight video record shown as a search hint.
///
/// Titles are non-empty and unique (case-sensitive, first-seen wins) within
/// a single published list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Suggestion {
    /// Provider video identifier, when the originating hit carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Video title; the dedup key.
    pub title: String,
    /// Channel that published the video.
    pub channel_title: String,
    /// Thumbnail URL, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Suggestion {
    /// What: Derive a suggestion from a raw provider hit.
    ///
    /// Inputs:
    /// - `hit`: Provider record; its title is assumed non-empty (filtered upstream)
    ///
    /// Output:
    /// - `Suggestion` carrying only the fields the hint list needs.
    #[must_use]
    pub fn from_hit(hit: &VideoHit) -> Self {
        Self {
            id: hit.video_id.clone(),
            title: hit.title.clone(),
            channel_title: hit.channel_title.clone(),
            thumbnail: hit.thumbnail.clone(),
        }
    }
}

/// Raw input line sent to the debouncing query worker.
#[derive(Clone, Debug)]
pub struct QueryInput {
    /// Monotonic sequence number assigned by the input reader.
    pub id: u64,
    /// Raw text exactly as entered.
    pub text: String,
}

/// Settled provider call, correlated back to the request that issued it.
#[derive(Debug)]
pub struct SuggestionOutcome {
    /// Echoed request identifier; mismatches mark a superseded response.
    pub id: u64,
    /// Normalized term the provider was queried with.
    pub term: String,
    /// Provider hits on success, or the surfaced failure.
    pub result: Result<Vec<VideoHit>, SuggestError>,
}
