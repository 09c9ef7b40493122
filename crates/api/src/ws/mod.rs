//! WebSocket infrastructure for pushing the live feed to dashboards.
//!
//! Provides connection management, heartbeat monitoring, the feed
//! broadcaster task, and the HTTP upgrade handler used by Axum routes.

mod broadcaster;
mod handler;
mod heartbeat;
pub mod manager;

pub use broadcaster::{disconnected_frame, snapshot_frame, start_feed_broadcaster};
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
