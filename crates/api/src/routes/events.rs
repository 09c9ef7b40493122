//! Route definitions for the `/events` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// POST   /           -> ingest       (device access event)
/// GET    /           -> list_events  (current ordered window)
/// DELETE /           -> clear_events
/// DELETE /{id}       -> delete_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(events::list_events)
                .post(events::ingest)
                .delete(events::clear_events),
        )
        .route("/events/{id}", delete(events::delete_event))
}
