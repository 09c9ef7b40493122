//! Shared response envelope types for API handlers.
//!
//! Read endpoints use a `{ "data": ... }` envelope; the device-facing
//! ingestion endpoint uses the `{ "success": true }` acknowledgment the
//! firmware expects. Use these types instead of ad-hoc
//! `serde_json::json!` to get compile-time type safety and consistent
//! serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Acknowledgment returned to the device on successful ingestion.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
