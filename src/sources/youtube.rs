//! YouTube Data API v3 search provider.

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::SuggestError;
use crate::sources::SearchProvider;
use crate::state::VideoHit;
use crate::util::config::Settings;
use crate::util::s;

/// Search provider backed by the YouTube Data API v3 `search` endpoint.
pub struct YouTubeProvider {
    /// Shared HTTP client (connection pooling across requests).
    http: reqwest::Client,
    /// Base API URL without a trailing slash.
    endpoint: String,
    /// API key sent with every request.
    api_key: String,
    /// `maxResults` requested from the API.
    max_results: u32,
}

impl YouTubeProvider {
    /// What: Build a provider from loaded settings.
    ///
    /// Inputs:
    /// - `settings`: Endpoint, API key, and result-count settings
    ///
    /// Output:
    /// - Provider holding a fresh pooled HTTP client.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            max_results: settings.max_results,
        }
    }
}

impl SearchProvider for YouTubeProvider {
    fn search(&self, term: &str) -> BoxFuture<'static, Result<Vec<VideoHit>, SuggestError>> {
        let http = self.http.clone();
        let url = format!("{}/search", self.endpoint);
        let term = term.to_string();
        let api_key = self.api_key.clone();
        let max_results = self.max_results.to_string();
        Box::pin(async move {
            let resp = http
                .get(&url)
                .query(&[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("maxResults", max_results.as_str()),
                    ("q", term.as_str()),
                    ("key", api_key.as_str()),
                ])
                .send()
                .await
                .map_err(|e| SuggestError::Provider(e.to_string()))?
                .error_for_status()
                .map_err(|e| SuggestError::Provider(e.to_string()))?;
            let payload: Value = resp
                .json()
                .await
                .map_err(|e| SuggestError::Payload(e.to_string()))?;
            parse_search_payload(&payload)
        })
    }
}

/// What: Extract video hits from a `search.list` response body.
///
/// Inputs:
/// - `payload`: Parsed JSON response
///
/// Output:
/// - Hits in response order; `Err(Payload)` when the `items` array is
///   missing entirely.
///
/// Details:
/// - Individual items without a snippet or with an empty title are skipped
///   rather than failing the whole response.
/// - An empty `items` array is a valid empty result.
pub fn parse_search_payload(payload: &Value) -> Result<Vec<VideoHit>, SuggestError> {
    let Some(items) = payload.get("items").and_then(Value::as_array) else {
        return Err(SuggestError::Payload("missing items array".into()));
    };
    let mut hits = Vec::with_capacity(items.len());
    for item in items {
        let Some(snippet) = item.get("snippet") else {
            continue;
        };
        let title = s(snippet, "title");
        if title.is_empty() {
            continue;
        }
        let video_id = item
            .get("id")
            .and_then(|id| id.get("videoId"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let thumbnail = snippet
            .get("thumbnails")
            .and_then(|t| t.get("default"))
            .and_then(|d| d.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string);
        hits.push(VideoHit {
            video_id,
            title,
            description: s(snippet, "description"),
            channel_title: s(snippet, "channelTitle"),
            published_at: s(snippet, "publishedAt"),
            thumbnail,
        });
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    /// What: A well-formed search response maps onto `VideoHit` records.
    ///
    /// - Input: Two items with ids, snippets, and default thumbnails
    /// - Output: Two hits with every field populated in response order
    fn parse_payload_maps_fields() {
        let payload = json!({
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "v1" },
                    "snippet": {
                        "title": "Borrow checker deep dive",
                        "description": "desc one",
                        "channelTitle": "Jon",
                        "publishedAt": "2024-02-01T10:00:00Z",
                        "thumbnails": { "default": { "url": "https://img/1.jpg" } }
                    }
                },
                {
                    "id": { "kind": "youtube#video", "videoId": "v2" },
                    "snippet": {
                        "title": "Async from scratch",
                        "description": "desc two",
                        "channelTitle": "Jon",
                        "publishedAt": "2024-03-01T10:00:00Z",
                        "thumbnails": { "default": { "url": "https://img/2.jpg" } }
                    }
                }
            ]
        });
        let hits = parse_search_payload(&payload).expect("payload parses");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].video_id.as_deref(), Some("v1"));
        assert_eq!(hits[0].title, "Borrow checker deep dive");
        assert_eq!(hits[0].channel_title, "Jon");
        assert_eq!(hits[1].thumbnail.as_deref(), Some("https://img/2.jpg"));
    }

    #[test]
    /// What: Items missing a snippet or title are skipped, not fatal.
    ///
    /// - Input: One valid item, one without snippet, one with empty title
    /// - Output: Only the valid item survives
    fn parse_payload_skips_malformed_items() {
        let payload = json!({
            "items": [
                { "id": { "videoId": "v1" } },
                {
                    "id": { "videoId": "v2" },
                    "snippet": { "title": "", "channelTitle": "c" }
                },
                {
                    "id": { "videoId": "v3" },
                    "snippet": { "title": "Kept", "channelTitle": "c" }
                }
            ]
        });
        let hits = parse_search_payload(&payload).expect("payload parses");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Kept");
        assert_eq!(hits[0].video_id.as_deref(), Some("v3"));
    }

    #[test]
    /// What: An empty items array is a valid empty result, not an error.
    ///
    /// - Input: `{"items": []}`
    /// - Output: `Ok` with zero hits
    fn parse_payload_empty_items_is_ok() {
        let hits = parse_search_payload(&json!({ "items": [] })).expect("empty is valid");
        assert!(hits.is_empty());
    }

    #[test]
    /// What: A body without an items array is a payload error.
    ///
    /// - Input: `{"error": {...}}` shaped body
    /// - Output: `Err(SuggestError::Payload)`
    fn parse_payload_missing_items_is_error() {
        let result = parse_search_payload(&json!({ "error": { "code": 403 } }));
        assert!(matches!(result, Err(SuggestError::Payload(_))));
    }
}
