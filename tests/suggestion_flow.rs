//! End-to-end suggestion flow: coordinator, provider, persistence.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use tokio::sync::mpsc;

use notesync::app::persist::{load_state, maybe_flush_state};
use notesync::error::SuggestError;
use notesync::sources::SearchProvider;
use notesync::state::{SuggestionCoordinator, SuggestionOutcome, VideoHit};

/// Scripted response for one provider call.
enum Script {
    /// Settle immediately with the given result.
    Ready(Result<Vec<VideoHit>, SuggestError>),
    /// Never settle; retired only by cancellation.
    Hang,
}

/// Provider double that pops scripted responses and counts calls.
struct ScriptedProvider {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Script>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(script.into()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SearchProvider for ScriptedProvider {
    fn search(&self, _term: &str) -> BoxFuture<'static, Result<Vec<VideoHit>, SuggestError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().expect("script lock").pop_front();
        match next {
            Some(Script::Ready(result)) => Box::pin(async move { result }),
            Some(Script::Hang) | None => Box::pin(futures::future::pending()),
        }
    }
}

fn hit(title: &str) -> VideoHit {
    VideoHit {
        video_id: Some(format!("id-{title}")),
        title: title.to_string(),
        description: "desc".into(),
        channel_title: "channel".into(),
        published_at: "2024-06-01T00:00:00Z".into(),
        thumbnail: Some("https://img.example.invalid/t.jpg".into()),
    }
}

/// Give spawned provider tasks a chance to settle, then apply every
/// deliverable outcome in order.
async fn settle(
    coord: &mut SuggestionCoordinator,
    rx: &mut mpsc::UnboundedReceiver<SuggestionOutcome>,
) {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    while let Ok(outcome) = rx.try_recv() {
        coord.apply_outcome(outcome);
    }
}

#[tokio::test]
/// What: A full search-then-restart flow serves the second run from the
/// persisted cache without any provider call.
///
/// Inputs:
/// - First coordinator resolves "rust traits" over the network and flushes
///   state to a temp file; second coordinator rehydrates from that file.
///
/// Output:
/// - Second run answers identically with zero provider calls, `loading`
///   false and `error` none after rehydration.
async fn search_persist_restart_serves_from_cache() {
    let dir = tempfile::tempdir().expect("temp dir");
    let state_path = dir.path().join("suggestions.json");

    let provider = ScriptedProvider::new(vec![Script::Ready(Ok(vec![hit("T1"), hit("T2")]))]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coord = SuggestionCoordinator::new(provider.clone(), tx);

    coord.request_suggestions("rust traits");
    settle(&mut coord, &mut rx).await;
    assert_eq!(coord.last_resolved, "rust traits");
    assert_eq!(coord.suggestions.len(), 2);
    assert_eq!(provider.calls(), 1);
    maybe_flush_state(&mut coord, &state_path);

    // Simulated restart: fresh coordinator, fresh provider, same state file.
    let restarted_provider = ScriptedProvider::new(vec![]);
    let (tx2, _rx2) = mpsc::unbounded_channel();
    let mut restarted = SuggestionCoordinator::new(restarted_provider.clone(), tx2);
    load_state(&state_path)
        .expect("state file present")
        .apply(&mut restarted);

    assert_eq!(restarted.query, "rust traits");
    assert_eq!(restarted.suggestions.len(), 2);
    assert!(!restarted.loading);
    assert!(restarted.error.is_none());

    restarted.request_suggestions("rust traits");
    assert_eq!(restarted.suggestions.len(), 2);
    assert_eq!(restarted_provider.calls(), 0);
}

#[tokio::test]
/// What: Rapid successive queries leave only the last one's answer.
///
/// Inputs:
/// - "x" (hangs), "y" (hangs), "z" (resolves) issued back-to-back
///
/// Output:
/// - State answers "z"; exactly three provider calls were issued and the
///   two superseded ones never report back.
async fn burst_of_queries_last_request_wins() {
    let provider = ScriptedProvider::new(vec![
        Script::Hang,
        Script::Hang,
        Script::Ready(Ok(vec![hit("Z")])),
    ]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coord = SuggestionCoordinator::new(provider.clone(), tx);

    coord.request_suggestions("x");
    coord.request_suggestions("y");
    coord.request_suggestions("z");
    assert_eq!(provider.calls(), 3);

    settle(&mut coord, &mut rx).await;
    assert_eq!(coord.last_resolved, "z");
    assert_eq!(coord.suggestions.len(), 1);
    assert_eq!(coord.suggestions[0].title, "Z");
    assert!(!coord.loading);
    assert!(coord.error.is_none());

    // Nothing further may arrive from the superseded calls.
    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
/// What: A provider failure followed by a successful retry recovers cleanly.
///
/// Inputs:
/// - First call rejects, second call for the same term resolves
///
/// Output:
/// - Error surfaced after the failure, cleared after the retry; the retry
///   result lands in the cache.
async fn failure_then_retry_recovers() {
    let provider = ScriptedProvider::new(vec![
        Script::Ready(Err(SuggestError::Provider("timeout".into()))),
        Script::Ready(Ok(vec![hit("R")])),
    ]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coord = SuggestionCoordinator::new(provider.clone(), tx);

    coord.request_suggestions("flaky");
    settle(&mut coord, &mut rx).await;
    assert!(coord.suggestions.is_empty());
    assert_eq!(coord.error, Some(SuggestError::Provider("timeout".into())));

    coord.request_suggestions("flaky");
    assert!(coord.loading);
    assert!(coord.error.is_none());
    settle(&mut coord, &mut rx).await;
    assert_eq!(coord.suggestions.len(), 1);
    assert!(coord.error.is_none());
    assert!(coord.cache().get("flaky").is_some());
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
/// What: Mixed-whitespace input is normalized before cache lookup.
///
/// Inputs:
/// - Search for "rust", then request "  rust  "
///
/// Output:
/// - Second request is a cache hit; still one provider call total.
async fn trimmed_term_hits_cache() {
    let provider = ScriptedProvider::new(vec![Script::Ready(Ok(vec![hit("T")]))]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coord = SuggestionCoordinator::new(provider.clone(), tx);

    coord.request_suggestions("rust");
    settle(&mut coord, &mut rx).await;
    assert_eq!(provider.calls(), 1);

    coord.request_suggestions("  rust  ");
    assert_eq!(coord.last_resolved, "rust");
    assert!(!coord.loading);
    assert_eq!(provider.calls(), 1);
}
