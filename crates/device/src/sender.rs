//! Event delivery loop.
//!
//! Plays the scripted scenario against the ingestion endpoint at a
//! fixed interval. Transport failures are retried with bounded
//! exponential backoff; after the last attempt the event is dropped
//! with a warning (the backend treats delivery as at-least-once, so a
//! dropped event is firmware-side loss, not corruption).

use std::time::Duration;

use crate::scenario::{EventPayload, SCENARIO};

/// Attempts per event, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Backoff before the first retry; doubles per attempt.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Run the simulator loop indefinitely.
///
/// Cycles through the scenario, posting one event per interval tick.
pub async fn run(api_url: &str, vault_id: &str, location: Option<&str>, interval: Duration) {
    let client = reqwest::Client::new();
    let mut ticker = tokio::time::interval(interval);

    for step in SCENARIO.iter().cycle() {
        ticker.tick().await;

        let payload = step.into_payload(vault_id, location);
        tracing::info!(status = %payload.status, "Reporting access event");

        send_with_retry(&client, api_url, &payload).await;
    }
}

/// POST one event, retrying transport failures with exponential backoff.
///
/// A non-2xx response is not retried: the backend has already made a
/// decision about the payload, and re-sending the same body cannot
/// change it.
pub async fn send_with_retry(client: &reqwest::Client, api_url: &str, payload: &EventPayload) {
    let mut backoff = INITIAL_BACKOFF;

    for attempt in 1..=MAX_ATTEMPTS {
        match client.post(api_url).json(payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(status = %payload.status, "Event acknowledged");
                return;
            }
            Ok(response) => {
                tracing::error!(
                    http_status = %response.status(),
                    status = %payload.status,
                    "Backend rejected event",
                );
                return;
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Event delivery failed");
            }
        }

        if attempt < MAX_ATTEMPTS {
            tokio::time::sleep(backoff).await;
            backoff *= 2;
        }
    }

    tracing::warn!(status = %payload.status, "Event dropped after {MAX_ATTEMPTS} attempts");
}
