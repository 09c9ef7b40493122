//! Canonical WebSocket message type tags.
//!
//! Shared between the backend broadcaster and dashboard clients so the
//! two sides never drift on spelling.

/// Full ordered window plus an optional transient alert.
pub const MSG_TYPE_FEED_SNAPSHOT: &str = "feed_snapshot";

/// The store subscription ended; the dashboard should render a
/// stale/disconnected state instead of silently freezing.
pub const MSG_TYPE_FEED_DISCONNECTED: &str = "feed_disconnected";
