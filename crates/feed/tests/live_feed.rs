//! Integration tests for `LiveFeed` against the in-process store:
//! baseline suppression, alert derivation, deletion visibility, and
//! disconnect signalling.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use tokio_util::sync::CancellationToken;
use vaultwatch_core::alert::AlertLevel;
use vaultwatch_core::event::NewEvent;
use vaultwatch_feed::{FeedEvent, LiveFeed, DEFAULT_WINDOW};
use vaultwatch_store::{EventStore, MemoryStore};

fn event(status: &str) -> NewEvent {
    NewEvent::classified(Some("V1".into()), Some(status.into()), None, None).unwrap()
}

/// Spawn a feed over the given store and return it with its event
/// receiver and cancellation token.
async fn start_feed(
    store: Arc<dyn EventStore>,
) -> (
    Arc<LiveFeed>,
    tokio::sync::broadcast::Receiver<FeedEvent>,
    CancellationToken,
) {
    let feed = Arc::new(LiveFeed::new(store, DEFAULT_WINDOW));
    let rx = feed.subscribe();
    let cancel = CancellationToken::new();

    let run_feed = Arc::clone(&feed);
    let run_cancel = cancel.clone();
    tokio::spawn(async move { run_feed.run(run_cancel).await });

    (feed, rx, cancel)
}

/// Receive the next feed event, failing the test after a grace period.
async fn next_event(rx: &mut tokio::sync::broadcast::Receiver<FeedEvent>) -> FeedEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for feed event")
        .expect("feed channel closed")
}

// ---------------------------------------------------------------------------
// Test: pre-existing history raises no alert on the initial snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initial_snapshot_with_history_raises_no_alert() {
    let store = Arc::new(MemoryStore::new());
    for _ in 0..5 {
        store.append(event("TAMPERING")).await.unwrap();
    }

    let (_feed, mut rx, _cancel) = start_feed(store.clone()).await;

    let first = next_event(&mut rx).await;
    assert_matches!(first, FeedEvent::Snapshot { records, alert } => {
        assert_eq!(records.len(), 5);
        assert!(alert.is_none(), "history must not flood alerts on load");
    });
}

// ---------------------------------------------------------------------------
// Test: the first record after an empty baseline raises no alert either
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_record_after_empty_baseline_raises_no_alert() {
    let store = Arc::new(MemoryStore::new());
    let (_feed, mut rx, _cancel) = start_feed(store.clone()).await;

    // Empty initial window.
    assert_matches!(next_event(&mut rx).await, FeedEvent::Snapshot { records, .. } => {
        assert!(records.is_empty());
    });

    store.append(event("TAMPERING")).await.unwrap();
    assert_matches!(next_event(&mut rx).await, FeedEvent::Snapshot { records, alert } => {
        assert_eq!(records.len(), 1);
        assert!(alert.is_none());
    });
}

// ---------------------------------------------------------------------------
// Test: a new record after the baseline raises the alert for its class
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_record_after_baseline_raises_classified_alert() {
    let store = Arc::new(MemoryStore::new());
    store.append(event("GRANTED")).await.unwrap();

    let (_feed, mut rx, _cancel) = start_feed(store.clone()).await;
    next_event(&mut rx).await; // baseline

    store.append(event("TAMPERING")).await.unwrap();
    assert_matches!(next_event(&mut rx).await, FeedEvent::Snapshot { records, alert } => {
        assert_eq!(records.len(), 2);
        // Most recent first.
        assert_eq!(records[0].raw_status, "TAMPERING");
        let alert = alert.expect("tampering must raise an alert");
        assert_eq!(alert.level, AlertLevel::Critical);
        assert_eq!(alert.duration_secs, 10);
    });

    store.append(event("GRANTED")).await.unwrap();
    assert_matches!(next_event(&mut rx).await, FeedEvent::Snapshot { alert, .. } => {
        let alert = alert.expect("granted must raise an alert");
        assert_eq!(alert.level, AlertLevel::Info);
        assert_eq!(alert.duration_secs, 5);
    });
}

// ---------------------------------------------------------------------------
// Test: INFO-class records raise no alert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn info_records_raise_no_alert() {
    let store = Arc::new(MemoryStore::new());
    store.append(event("GRANTED")).await.unwrap();

    let (_feed, mut rx, _cancel) = start_feed(store.clone()).await;
    next_event(&mut rx).await; // baseline

    store.append(event("BATTERY_LOW")).await.unwrap();
    assert_matches!(next_event(&mut rx).await, FeedEvent::Snapshot { records, alert } => {
        assert_eq!(records[0].raw_status, "BATTERY_LOW");
        assert!(alert.is_none());
    });
}

// ---------------------------------------------------------------------------
// Test: deletions show up in the next snapshot without alerting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deletion_is_reflected_in_next_snapshot() {
    let store = Arc::new(MemoryStore::new());
    let first = store.append(event("GRANTED")).await.unwrap();
    store.append(event("DENIED")).await.unwrap();

    let (_feed, mut rx, _cancel) = start_feed(store.clone()).await;
    next_event(&mut rx).await; // baseline

    store.delete_one(&first).await.unwrap();
    assert_matches!(next_event(&mut rx).await, FeedEvent::Snapshot { records, alert } => {
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_status, "DENIED");
        // Head unchanged, so no alert fires.
        assert!(alert.is_none());
    });

    store.delete_all().await.unwrap();
    assert_matches!(next_event(&mut rx).await, FeedEvent::Snapshot { records, alert } => {
        assert!(records.is_empty());
        assert!(alert.is_none());
    });
}

// ---------------------------------------------------------------------------
// Test: a closed store surfaces as an explicit disconnect event
// ---------------------------------------------------------------------------

#[tokio::test]
async fn closed_store_publishes_disconnected() {
    let store = Arc::new(MemoryStore::new());
    let (_feed, mut rx, _cancel) = start_feed(store.clone()).await;

    next_event(&mut rx).await; // initial empty window
    store.close().await;

    assert_matches!(next_event(&mut rx).await, FeedEvent::Disconnected);
}

// ---------------------------------------------------------------------------
// Test: cancellation stops the loop without a disconnect event
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancellation_stops_the_loop() {
    let store = Arc::new(MemoryStore::new());
    let (_feed, mut rx, cancel) = start_feed(store.clone()).await;

    next_event(&mut rx).await; // initial empty window
    cancel.cancel();

    // Give the loop time to observe the cancellation, then verify no
    // further events arrive for subsequent mutations.
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.append(event("GRANTED")).await.unwrap();

    let res = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(res.is_err(), "cancelled feed must not publish");
}
