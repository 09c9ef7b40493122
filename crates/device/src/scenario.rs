//! The deterministic access-event scenario the simulator plays.
//!
//! Mirrors what the vault firmware reports in the field: fingerprint
//! opens, failed attempts, a passcode open, a tampering alarm, and a
//! status token the backend does not recognize.

use serde::Serialize;

/// One ingestion payload as posted to the backend.
///
/// Matches the wire contract of `POST /api/v1/events`; optional fields
/// are omitted entirely rather than sent as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint_id: Option<String>,
    pub status: String,
    pub vault_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One step of the scripted scenario, before vault identity is applied.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioStep {
    pub status: &'static str,
    pub fingerprint_id: Option<&'static str>,
}

impl ScenarioStep {
    /// Bind the step to a concrete vault identity and location.
    pub fn into_payload(self, vault_id: &str, location: Option<&str>) -> EventPayload {
        EventPayload {
            fingerprint_id: self.fingerprint_id.map(str::to_string),
            status: self.status.to_string(),
            vault_id: vault_id.to_string(),
            location: location.map(str::to_string),
        }
    }
}

/// The scripted event cycle, replayed in order.
pub const SCENARIO: &[ScenarioStep] = &[
    ScenarioStep {
        status: "GRANTED",
        fingerprint_id: Some("1"),
    },
    ScenarioStep {
        status: "DENIED",
        fingerprint_id: Some("99"),
    },
    ScenarioStep {
        status: "GRANTED",
        fingerprint_id: None, // passcode open
    },
    ScenarioStep {
        status: "DENIED",
        fingerprint_id: None,
    },
    ScenarioStep {
        status: "TAMPERING",
        fingerprint_id: None,
    },
    ScenarioStep {
        status: "BATTERY_LOW",
        fingerprint_id: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_covers_every_status_class() {
        let statuses: Vec<&str> = SCENARIO.iter().map(|s| s.status).collect();

        assert!(statuses.contains(&"GRANTED"));
        assert!(statuses.contains(&"DENIED"));
        assert!(statuses.contains(&"TAMPERING"));
        // At least one token the backend classifies as INFO.
        assert!(statuses
            .iter()
            .any(|s| !["GRANTED", "DENIED", "TAMPERING"].contains(s)));
    }

    #[test]
    fn payload_serializes_with_camel_case_and_omits_absent_fields() {
        let step = ScenarioStep {
            status: "GRANTED",
            fingerprint_id: None,
        };
        let json = serde_json::to_value(step.into_payload("V1", None)).unwrap();

        assert_eq!(json["status"], "GRANTED");
        assert_eq!(json["vaultId"], "V1");
        assert!(json.get("fingerprintId").is_none());
        assert!(json.get("location").is_none());
    }

    #[test]
    fn payload_carries_identity_when_present() {
        let step = ScenarioStep {
            status: "DENIED",
            fingerprint_id: Some("99"),
        };
        let json = serde_json::to_value(step.into_payload("V2", Some("Lobby"))).unwrap();

        assert_eq!(json["fingerprintId"], "99");
        assert_eq!(json["location"], "Lobby");
    }
}
