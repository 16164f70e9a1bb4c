//! Bounded FIFO cache mapping normalized queries to suggestion lists.
//!
//! Insertion order defines eviction order: once the cap is exceeded the
//! oldest-inserted entries are dropped until the cap holds again. This is
//! deliberately FIFO rather than LRU; re-querying a cached term does not
//! refresh its position.

use super::types::Suggestion;

/// Maximum number of query entries retained in the cache.
pub const CACHE_CAP: usize = 50;

/// One cached query with its capped suggestion list.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct CacheEntry {
    /// Normalized (trimmed) query text; the lookup key.
    term: String,
    /// Capped, title-deduplicated suggestion list for the term.
    suggestions: Vec<Suggestion>,
}

/// FIFO-bounded query cache.
///
/// Entries are stored as an ordered sequence so that insertion order (and
/// therefore eviction order) survives serialization. Lookups are linear,
/// which is fine at a 50-entry bound.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SuggestionCache {
    /// Oldest-inserted first.
    entries: Vec<CacheEntry>,
}

impl SuggestionCache {
    /// What: Look up the suggestion list cached for a normalized term.
    ///
    /// Inputs:
    /// - `term`: Normalized (already trimmed) query text
    ///
    /// Output:
    /// - `Some(&[Suggestion])` on a hit; `None` otherwise. Lookup does not
    ///   refresh the entry's eviction position.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<&[Suggestion]> {
        self.entries
            .iter()
            .find(|e| e.term == term)
            .map(|e| e.suggestions.as_slice())
    }

    /// What: Insert or overwrite the suggestion list for a term, evicting
    /// oldest-inserted entries beyond [`CACHE_CAP`].
    ///
    /// Inputs:
    /// - `term`: Normalized query text
    /// - `suggestions`: Capped, deduplicated list to store
    ///
    /// Details:
    /// - Overwriting an existing term keeps its original position (FIFO, not
    ///   LRU).
    pub fn insert(&mut self, term: &str, suggestions: Vec<Suggestion>) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.term == term) {
            existing.suggestions = suggestions;
            return;
        }
        self.entries.push(CacheEntry {
            term: term.to_string(),
            suggestions,
        });
        if self.entries.len() > CACHE_CAP {
            let excess = self.entries.len() - CACHE_CAP;
            self.entries.drain(..excess);
        }
    }

    /// Number of cached query entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a one-item suggestion list tagged with `label`.
    fn list(label: &str) -> Vec<Suggestion> {
        vec![Suggestion {
            id: None,
            title: label.to_string(),
            channel_title: "ch".into(),
            thumbnail: None,
        }]
    }

    #[test]
    /// What: Inserting one entry beyond the cap evicts exactly the oldest.
    ///
    /// - Input: 50 distinct terms, then a 51st
    /// - Output: `q0` is gone, `q1` and `q50` are present, length holds at 50
    fn eviction_drops_oldest_inserted_at_cap() {
        let mut cache = SuggestionCache::default();
        for i in 0..CACHE_CAP {
            cache.insert(&format!("q{i}"), list(&format!("t{i}")));
        }
        assert_eq!(cache.len(), CACHE_CAP);
        assert!(cache.get("q0").is_some());

        cache.insert("q50", list("t50"));
        assert_eq!(cache.len(), CACHE_CAP);
        assert!(cache.get("q0").is_none());
        assert!(cache.get("q1").is_some());
        assert!(cache.get("q50").is_some());
    }

    #[test]
    /// What: Overwriting an existing term does not refresh its eviction slot.
    ///
    /// - Input: Full cache, `q0` re-inserted with a new value, then one more term
    /// - Output: `q0` still evicted first despite being the most recent write
    fn reinsert_keeps_fifo_position() {
        let mut cache = SuggestionCache::default();
        for i in 0..CACHE_CAP {
            cache.insert(&format!("q{i}"), list(&format!("t{i}")));
        }
        cache.insert("q0", list("fresh"));
        assert_eq!(cache.len(), CACHE_CAP);
        assert_eq!(
            cache.get("q0").and_then(|s| s.first()).map(|s| s.title.clone()),
            Some("fresh".to_string())
        );

        cache.insert("q50", list("t50"));
        assert!(cache.get("q0").is_none());
        assert!(cache.get("q50").is_some());
    }

    #[test]
    /// What: Lookup is exact-match on the normalized key.
    ///
    /// - Input: Entry stored under "rust"
    /// - Output: "rust" hits; " rust " and "Rust" miss
    fn get_is_exact_match() {
        let mut cache = SuggestionCache::default();
        cache.insert("rust", list("t"));
        assert!(cache.get("rust").is_some());
        assert!(cache.get(" rust ").is_none());
        assert!(cache.get("Rust").is_none());
    }

    #[test]
    /// What: Serde roundtrip preserves insertion (eviction) order.
    ///
    /// - Input: Three entries serialized and restored
    /// - Output: Entries come back in insertion order, oldest first
    fn serde_roundtrip_preserves_order() {
        let mut cache = SuggestionCache::default();
        cache.insert("a", list("ta"));
        cache.insert("b", list("tb"));
        cache.insert("c", list("tc"));
        let body = serde_json::to_string(&cache).expect("serialize cache");
        let back: SuggestionCache = serde_json::from_str(&body).expect("deserialize cache");
        assert_eq!(back.len(), 3);
        assert_eq!(back.entries[0].term, "a");
        assert_eq!(back.entries[2].term, "c");
    }
}
