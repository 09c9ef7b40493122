//! `vaultwatch-feed` -- the Live Feed Consumer.
//!
//! A single-consumer loop over store window snapshots. Each incoming
//! window is reordered (most recent first), checked for a newly arrived
//! head record, and republished atomically as a [`FeedEvent`] on a
//! broadcast channel. Downstream consumers (the WebSocket broadcaster)
//! never observe a partially updated list.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use vaultwatch_core::alert::Alert;
use vaultwatch_core::event::EventRecord;
use vaultwatch_core::types::EventId;
use vaultwatch_store::EventStore;

/// Default subscription window size.
pub const DEFAULT_WINDOW: usize = 50;

/// Buffer capacity for the outbound broadcast channel.
const BROADCAST_CAPACITY: usize = 64;

/// A derived feed update published to dashboards.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A fresh ordered window, plus the transient alert raised by a
    /// newly arrived record (if any).
    Snapshot {
        records: Arc<[EventRecord]>,
        alert: Option<Alert>,
    },
    /// The store subscription ended; consumers should surface a
    /// stale/disconnected state rather than silently freezing.
    Disconnected,
}

/// Order a store window for display: timestamp descending, with id
/// descending as tiebreaker.
///
/// The store delivers windows in insertion order, so the id tiebreaker
/// makes tied timestamps insertion-order-reversed, matching the rest of
/// the ordering.
pub fn order_window(mut records: Vec<EventRecord>) -> Vec<EventRecord> {
    records.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
    records
}

/// The subscription-driven view model between the store and dashboards.
pub struct LiveFeed {
    store: Arc<dyn EventStore>,
    window: usize,
    tx: broadcast::Sender<FeedEvent>,
}

impl LiveFeed {
    pub fn new(store: Arc<dyn EventStore>, window: usize) -> Self {
        let (tx, _rx) = broadcast::channel(BROADCAST_CAPACITY);
        Self { store, window, tx }
    }

    /// Subscribe to derived feed events.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.tx.subscribe()
    }

    /// Run the consumer loop until cancelled or the store shuts down.
    ///
    /// Strictly single-flight: each snapshot is reordered, evaluated for
    /// alerts, and published before the next one is received.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut sub = self.store.subscribe(self.window).await;

        // Head id of the previous ordered snapshot. `None` until the
        // first non-empty snapshot establishes the baseline.
        let mut last_head: Option<EventId> = None;
        let mut first_snapshot = true;

        loop {
            let window = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Live feed cancelled");
                    return;
                }
                window = sub.recv() => window,
            };

            let Some(window) = window else {
                tracing::warn!("Store subscription ended");
                let _ = self.tx.send(FeedEvent::Disconnected);
                return;
            };

            let ordered = order_window(window);
            let alert = self.evaluate_head(&ordered, &mut last_head, first_snapshot);
            first_snapshot = false;

            let _ = self.tx.send(FeedEvent::Snapshot {
                records: ordered.into(),
                alert,
            });
        }
    }

    /// Detect a newly arrived head record and derive its alert.
    ///
    /// The first snapshot after subscribing only establishes the
    /// baseline, so pre-existing history never floods the dashboard
    /// with alerts on initial load. An empty snapshot leaves the
    /// tracked head untouched.
    fn evaluate_head(
        &self,
        ordered: &[EventRecord],
        last_head: &mut Option<EventId>,
        first_snapshot: bool,
    ) -> Option<Alert> {
        let head = ordered.first()?;

        let is_new = match last_head {
            Some(prev) => *prev != head.id,
            // A record arriving after we subscribed to an empty store
            // still establishes the baseline without alerting.
            None => false,
        };
        *last_head = Some(head.id.clone());

        if first_snapshot || !is_new {
            return None;
        }

        let alert = Alert::for_new_record(head);
        if let Some(ref alert) = alert {
            tracing::info!(
                id = %head.id,
                classification = head.classification.as_str(),
                level = ?alert.level,
                "New security event",
            );
        }
        alert
    }
}
