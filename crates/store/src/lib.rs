//! `vaultwatch-store` -- the Event Store boundary.
//!
//! [`EventStore`] is the capability trait every component receives by
//! injection (never via ambient/global lookup), so tests substitute
//! fakes freely. [`MemoryStore`] is the bundled in-process realtime
//! implementation with push-based full-window subscriptions.

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{EventStore, StoreSubscription};
