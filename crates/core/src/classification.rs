//! Device status classification.
//!
//! The vault firmware reports a raw status token (`GRANTED`, `DENIED`,
//! `TAMPERING`, or anything else for firmware states we do not know
//! about). Classification maps that token to an alert category and a
//! human-readable log message. The mapping is total: unrecognized
//! statuses degrade to [`Classification::Info`] rather than erroring,
//! so the ingestion channel never drops an unknown firmware state.

use serde::{Deserialize, Serialize};

/// Alert category derived from a raw device status.
///
/// Never supplied by the producer; always computed via
/// [`Classification::from_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "AUTHORIZED")]
    Authorized,
    #[serde(rename = "UNAUTHORIZED_ACCESS")]
    UnauthorizedAccess,
    #[serde(rename = "CRITICAL_ALERT")]
    CriticalAlert,
    #[serde(rename = "INFO")]
    Info,
}

impl Classification {
    /// Classify a raw status token. Total over all strings.
    pub fn from_status(raw_status: &str) -> Self {
        match raw_status {
            "GRANTED" => Classification::Authorized,
            "DENIED" => Classification::UnauthorizedAccess,
            "TAMPERING" => Classification::CriticalAlert,
            _ => Classification::Info,
        }
    }

    /// The wire name of this classification (matches the serde rename).
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Authorized => "AUTHORIZED",
            Classification::UnauthorizedAccess => "UNAUTHORIZED_ACCESS",
            Classification::CriticalAlert => "CRITICAL_ALERT",
            Classification::Info => "INFO",
        }
    }
}

/// Build the human-readable log line for a classified event.
///
/// Pure function of the classification, the raw status, and the optional
/// credential id. The credential placeholder differs by branch: a granted
/// open without a fingerprint was a passcode open, while a denied attempt
/// without one is simply unknown.
pub fn log_message(
    classification: Classification,
    raw_status: &str,
    fingerprint_id: Option<&str>,
) -> String {
    match classification {
        Classification::Authorized => {
            let id = fingerprint_id.unwrap_or("Passcode");
            format!("Vault successfully opened (ID: {id}).")
        }
        Classification::UnauthorizedAccess => {
            let id = fingerprint_id.unwrap_or("Unknown");
            format!("ALERT: Failed access attempt! (ID: {id}).")
        }
        Classification::CriticalAlert => "SECURITY: VIBRATION/TAMPERING DETECTED!".to_string(),
        Classification::Info => format!("System update - {raw_status}."),
    }
}
