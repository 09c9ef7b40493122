//! Forwards derived feed events to every dashboard connection.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::broadcast;
use vaultwatch_core::alert::Alert;
use vaultwatch_core::event::EventRecord;
use vaultwatch_core::message_types::{MSG_TYPE_FEED_DISCONNECTED, MSG_TYPE_FEED_SNAPSHOT};
use vaultwatch_feed::FeedEvent;

use crate::ws::manager::WsManager;

/// Serialize a feed snapshot into its wire frame.
pub fn snapshot_frame(records: &[EventRecord], alert: Option<&Alert>) -> String {
    json!({
        "type": MSG_TYPE_FEED_SNAPSHOT,
        "records": records,
        "alert": alert,
    })
    .to_string()
}

/// Serialize the disconnect notice into its wire frame.
pub fn disconnected_frame() -> String {
    json!({ "type": MSG_TYPE_FEED_DISCONNECTED }).to_string()
}

/// Spawn the task that relays [`FeedEvent`]s to all WebSocket clients.
///
/// The task ends when the feed channel closes (live feed shut down).
/// A lagged receiver skips to the newest event; every snapshot is a full
/// window, so dropped intermediates lose nothing.
pub fn start_feed_broadcaster(
    ws_manager: Arc<WsManager>,
    mut feed_rx: broadcast::Receiver<FeedEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = match feed_rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Feed broadcaster lagged, skipping to newest");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Feed channel closed, broadcaster stopping");
                    return;
                }
            };

            let frame = match event {
                FeedEvent::Snapshot { records, alert } => {
                    snapshot_frame(&records, alert.as_ref())
                }
                FeedEvent::Disconnected => disconnected_frame(),
            };

            ws_manager.broadcast(Message::Text(frame.into())).await;
        }
    })
}
