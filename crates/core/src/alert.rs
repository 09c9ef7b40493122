//! Transient dashboard alerts raised for newly arrived security events.

use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::event::EventRecord;

/// Display duration for a critical alert (seconds).
pub const CRITICAL_ALERT_DURATION_SECS: u64 = 10;

/// Display duration for warning and informational alerts (seconds).
pub const DEFAULT_ALERT_DURATION_SECS: u64 = 5;

/// Severity of a transient alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

/// A transient alert pushed alongside a feed snapshot when a new
/// security-relevant record arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    /// How long the dashboard should display the alert, in seconds.
    pub duration_secs: u64,
}

impl Alert {
    /// Derive the alert for a newly arrived record, if its classification
    /// warrants one. `INFO` records raise nothing.
    pub fn for_new_record(record: &EventRecord) -> Option<Alert> {
        match record.classification {
            Classification::CriticalAlert => Some(Alert {
                level: AlertLevel::Critical,
                title: "SECURITY BREACH DETECTED".to_string(),
                message: format!("Vibration sensor triggered on vault {}!", record.vault_id),
                duration_secs: CRITICAL_ALERT_DURATION_SECS,
            }),
            Classification::UnauthorizedAccess => Some(Alert {
                level: AlertLevel::Warning,
                title: "Access Denied".to_string(),
                message: record.message.clone(),
                duration_secs: DEFAULT_ALERT_DURATION_SECS,
            }),
            Classification::Authorized => Some(Alert {
                level: AlertLevel::Info,
                title: "Access Granted".to_string(),
                message: record.message.clone(),
                duration_secs: DEFAULT_ALERT_DURATION_SECS,
            }),
            Classification::Info => None,
        }
    }
}
