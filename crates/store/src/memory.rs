//! In-process realtime event store.
//!
//! Single `tokio::sync::Mutex` over the record list plus the subscriber
//! registry. Snapshot fan-out uses unbounded senders, so no `.await`
//! happens while a subscriber is being notified; closed subscriber
//! channels are pruned on send failure.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, Mutex};
use vaultwatch_core::event::{EventRecord, NewEvent};
use vaultwatch_core::types::{EventId, Timestamp};

use crate::error::StoreError;
use crate::store::{EventStore, StoreSubscription};

struct Subscriber {
    limit: usize,
    tx: mpsc::UnboundedSender<Vec<EventRecord>>,
}

struct Inner {
    records: Vec<EventRecord>,
    next_seq: u64,
    last_timestamp: Option<Timestamp>,
    subscribers: Vec<Subscriber>,
}

impl Inner {
    /// The most recent `limit` records, oldest first.
    fn window(&self, limit: usize) -> Vec<EventRecord> {
        let start = self.records.len().saturating_sub(limit);
        self.records[start..].to_vec()
    }

    /// Push a fresh window to every subscriber, dropping the ones whose
    /// receiving end has gone away.
    fn notify_subscribers(&mut self) {
        let records = &self.records;
        self.subscribers.retain(|sub| {
            let start = records.len().saturating_sub(sub.limit);
            sub.tx.send(records[start..].to_vec()).is_ok()
        });
    }

    /// Mint the next insertion timestamp, clamped non-decreasing so
    /// insertion order and timestamp order cannot diverge backwards
    /// even if the wall clock steps.
    fn mint_timestamp(&mut self) -> Timestamp {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}

/// The bundled [`EventStore`] implementation.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_seq: 1,
                last_timestamp: None,
                subscribers: Vec::new(),
            }),
        }
    }

    /// End every active subscription. Subscribers observe the stream
    /// ending and can surface a disconnected state.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        let count = inner.subscribers.len();
        inner.subscribers.clear();
        tracing::info!(count, "Closed all store subscriptions");
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn append(&self, event: NewEvent) -> Result<EventId, StoreError> {
        let mut inner = self.inner.lock().await;

        let id = EventId::from_sequence(inner.next_seq);
        inner.next_seq += 1;
        let timestamp = inner.mint_timestamp();

        let record = event.into_record(id.clone(), timestamp);
        tracing::debug!(id = %record.id, vault_id = %record.vault_id, "Event appended");
        inner.records.push(record);
        inner.notify_subscribers();

        Ok(id)
    }

    async fn subscribe(&self, limit: usize) -> StoreSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().await;

        // Initial delivery: the current window, before any mutation.
        let _ = tx.send(inner.window(limit));
        inner.subscribers.push(Subscriber { limit, tx });

        StoreSubscription::new(rx)
    }

    async fn delete_one(&self, id: &EventId) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;

        let before = inner.records.len();
        inner.records.retain(|r| r.id != *id);
        let removed = inner.records.len() < before;

        if removed {
            inner.notify_subscribers();
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut inner = self.inner.lock().await;

        let removed = inner.records.len();
        inner.records.clear();
        inner.notify_subscribers();
        Ok(removed)
    }

    async fn snapshot(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.window(limit))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.len())
    }
}
