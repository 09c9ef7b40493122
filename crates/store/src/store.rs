use async_trait::async_trait;
use tokio::sync::mpsc;
use vaultwatch_core::event::{EventRecord, NewEvent};
use vaultwatch_core::types::EventId;

use crate::error::StoreError;

/// A push-based subscription to the store's most recent window.
///
/// The store delivers the full current window (oldest first, in
/// insertion order) immediately on subscribe and again on every
/// mutation. Dropping the subscription unsubscribes; a closed store
/// ends the stream.
pub struct StoreSubscription {
    rx: mpsc::UnboundedReceiver<Vec<EventRecord>>,
}

impl StoreSubscription {
    /// Wrap a snapshot channel. Store implementations (including test
    /// fakes) construct subscriptions from the receiver half.
    pub fn new(rx: mpsc::UnboundedReceiver<Vec<EventRecord>>) -> Self {
        Self { rx }
    }

    /// Receive the next full-window snapshot, or `None` once the store
    /// has shut down.
    pub async fn recv(&mut self) -> Option<Vec<EventRecord>> {
        self.rx.recv().await
    }
}

/// Capability interface for the append-only realtime event collection.
///
/// One handle is bound to a single vault-event namespace at
/// construction. Shared across the application as `Arc<dyn EventStore>`.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append a validated event. The store mints `id` and `timestamp`;
    /// the returned future resolves only after the store acknowledges.
    async fn append(&self, event: NewEvent) -> Result<EventId, StoreError>;

    /// Subscribe to the most recent `limit` records. The current window
    /// is delivered immediately as the first snapshot.
    async fn subscribe(&self, limit: usize) -> StoreSubscription;

    /// Remove exactly the named record. Returns whether it existed.
    async fn delete_one(&self, id: &EventId) -> Result<bool, StoreError>;

    /// Clear the collection. Returns how many records were removed.
    async fn delete_all(&self) -> Result<usize, StoreError>;

    /// One-shot read of the current window (oldest first).
    async fn snapshot(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError>;

    /// Total number of records in the collection.
    async fn count(&self) -> Result<usize, StoreError>;
}
