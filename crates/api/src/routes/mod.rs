pub mod events;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws              WebSocket (dashboard live feed)
///
/// /events          POST ingest, GET ordered window, DELETE clear all
/// /events/{id}     DELETE one record
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(events::router())
}
