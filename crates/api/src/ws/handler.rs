use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use vaultwatch_store::EventStore;

use crate::state::AppState;
use crate::ws::broadcaster::snapshot_frame;

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with `WsManager` and
/// managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single WebSocket connection after upgrade.
///
/// 1. Registers the connection with `WsManager`.
/// 2. Sends the current ordered window as the initial snapshot frame.
/// 3. Spawns a sender task that forwards messages from the manager channel.
/// 4. Processes inbound messages on the current task.
/// 5. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Dashboard connected");

    // Register and get the receiver for outbound messages.
    let mut rx = state.ws_manager.add(conn_id.clone()).await;

    // Queue the current window so the dashboard renders immediately
    // instead of waiting for the next store mutation.
    match state.store.snapshot(state.config.feed_window).await {
        Ok(window) => {
            let records = vaultwatch_feed::order_window(window);
            let frame = snapshot_frame(&records, None);
            state
                .ws_manager
                .send_to(&conn_id, Message::Text(frame.into()))
                .await;
        }
        Err(e) => {
            tracing::error!(conn_id = %conn_id, error = %e, "Initial snapshot failed");
        }
    }

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: the dashboard never sends application messages;
    // we only care about pongs and close frames.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Dashboard disconnected");
}
