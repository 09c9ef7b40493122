//! Event record shapes: what the ingestion handler builds and what the
//! store persists.

use serde::{Deserialize, Serialize};

use crate::classification::{log_message, Classification};
use crate::error::CoreError;
use crate::types::{EventId, Timestamp};

/// Placeholder stored when a request carries no fingerprint id
/// (passcode-based or anonymous access attempt).
pub const FINGERPRINT_NONE: &str = "N/A";

/// A persisted access event, as stored and as served to dashboards.
///
/// Immutable after creation except for whole-record deletion; there is
/// no partial update path. Field names are camelCase on the wire to
/// match the device/dashboard contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Store-assigned key; lexicographic order equals insertion order.
    pub id: EventId,
    /// Derived alert category (see [`Classification::from_status`]).
    pub classification: Classification,
    /// Human-readable summary derived from classification + identifiers.
    pub message: String,
    /// Reporting device identifier. Always non-empty.
    pub vault_id: String,
    /// The untranslated status token as received. Always non-empty.
    pub raw_status: String,
    /// Credential id, or [`FINGERPRINT_NONE`] when the request carried none.
    pub fingerprint_id: String,
    /// Human-readable location; absent means unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Store-assigned insertion time. Never client-supplied.
    pub timestamp: Timestamp,
    /// Read flag for dashboard read-state logic. Defaults to false.
    pub read: bool,
}

/// A validated, classified event ready for appending.
///
/// Everything an [`EventRecord`] has except `id` and `timestamp`, which
/// the store assigns. Constructed only through [`NewEvent::classified`]
/// so `classification` and `message` can never be set independently of
/// `raw_status`.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub classification: Classification,
    pub message: String,
    pub vault_id: String,
    pub raw_status: String,
    pub fingerprint_id: String,
    pub location: Option<String>,
    pub read: bool,
}

impl NewEvent {
    /// Validate and classify a raw ingestion payload.
    ///
    /// `vault_id` and `status` must be non-empty; anything else is a
    /// validation failure and the event never reaches the store.
    pub fn classified(
        vault_id: Option<String>,
        status: Option<String>,
        fingerprint_id: Option<String>,
        location: Option<String>,
    ) -> Result<Self, CoreError> {
        let (vault_id, raw_status) = match (vault_id, status) {
            (Some(v), Some(s)) if !v.is_empty() && !s.is_empty() => (v, s),
            _ => {
                return Err(CoreError::Validation(
                    "Missing vaultId or status".to_string(),
                ))
            }
        };

        let classification = Classification::from_status(&raw_status);
        let message = log_message(classification, &raw_status, fingerprint_id.as_deref());

        Ok(Self {
            classification,
            message,
            vault_id,
            raw_status,
            fingerprint_id: fingerprint_id.unwrap_or_else(|| FINGERPRINT_NONE.to_string()),
            location,
            read: false,
        })
    }

    /// Materialize the persisted record once the store has assigned
    /// `id` and `timestamp`.
    pub fn into_record(self, id: EventId, timestamp: Timestamp) -> EventRecord {
        EventRecord {
            id,
            classification: self.classification,
            message: self.message,
            vault_id: self.vault_id,
            raw_status: self.raw_status,
            fingerprint_id: self.fingerprint_id,
            location: self.location,
            timestamp,
            read: self.read,
        }
    }
}
