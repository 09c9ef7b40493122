use std::sync::Arc;

use vaultwatch_store::EventStore;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The event store handle, injected so tests can substitute fakes.
    pub store: Arc<dyn EventStore>,
    /// WebSocket connection manager (dashboard clients).
    pub ws_manager: Arc<WsManager>,
}
