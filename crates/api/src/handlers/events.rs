//! Handlers for the `/events` resource.
//!
//! Ingestion of device access events, the ordered event log listing,
//! and the delete commands issued by the dashboard.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vaultwatch_core::error::CoreError;
use vaultwatch_core::event::{EventRecord, NewEvent};
use vaultwatch_core::types::EventId;
use vaultwatch_store::EventStore;

use crate::error::{AppError, AppResult};
use crate::response::{AckResponse, DataResponse};
use crate::state::AppState;

/// Ingestion payload reported by the vault device.
///
/// Required fields are `Option` so that a missing field surfaces as the
/// contract's `Missing vaultId or status` validation error instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub fingerprint_id: Option<String>,
    pub status: Option<String>,
    pub vault_id: Option<String>,
    pub location: Option<String>,
}

/// POST /api/v1/events
///
/// Validate, classify, and append a device access event. The response
/// is sent only after the store acknowledges the append; store-level
/// failures surface as 500 and are not retried here (the device
/// re-sends on transport failure).
pub async fn ingest(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> AppResult<Json<AckResponse>> {
    let Json(req) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    let event = NewEvent::classified(req.vault_id, req.status, req.fingerprint_id, req.location)?;

    tracing::info!(
        vault_id = %event.vault_id,
        status = %event.raw_status,
        classification = event.classification.as_str(),
        "Device event received",
    );

    let id = state.store.append(event).await?;
    tracing::debug!(id = %id, "Event acknowledged by store");

    Ok(Json(AckResponse::ok()))
}

/// GET /api/v1/events
///
/// The current window, ordered most recent first (same ordering the
/// live feed publishes).
pub async fn list_events(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventRecord>>>> {
    let window = state.store.snapshot(state.config.feed_window).await?;
    let records = vaultwatch_feed::order_window(window);
    Ok(Json(DataResponse { data: records }))
}

/// DELETE /api/v1/events/{id}
///
/// Remove a single record. Returns 404 if no record has that id.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = EventId::parse(id);
    let removed = state.store.delete_one(&id).await?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: id.to_string(),
        }))
    }
}

/// Body of the clear-all response.
#[derive(Debug, serde::Serialize)]
pub struct ClearResult {
    pub deleted: usize,
}

/// DELETE /api/v1/events
///
/// Clear the entire security log.
pub async fn clear_events(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ClearResult>>> {
    let deleted = state.store.delete_all().await?;
    tracing::info!(deleted, "Security log cleared");
    Ok(Json(DataResponse {
        data: ClearResult { deleted },
    }))
}
