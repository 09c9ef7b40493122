//! `vaultwatch-device` -- vault access-event simulator.
//!
//! Stands in for the embedded vault lock: plays a scripted cycle of
//! access events (fingerprint opens, failed attempts, a passcode open,
//! tampering, an unrecognized status) against the backend's ingestion
//! endpoint, re-sending on transport failure.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default | Description                               |
//! |-----------------------|----------|---------|-------------------------------------------|
//! | `VAULTWATCH_API_URL`  | yes      | --      | Ingestion endpoint, e.g. `http://host:3000/api/v1/events` |
//! | `VAULT_ID`            | yes      | --      | Identifier this device reports as         |
//! | `VAULT_LOCATION`      | no       | unset   | Human-readable location string            |
//! | `EVENT_INTERVAL_SECS` | no       | `15`    | Seconds between reported events           |

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultwatch_device::sender;

/// Default interval between reported events.
const DEFAULT_INTERVAL_SECS: u64 = 15;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaultwatch_device=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = std::env::var("VAULTWATCH_API_URL").unwrap_or_else(|_| {
        tracing::error!("VAULTWATCH_API_URL environment variable is required");
        std::process::exit(1);
    });

    let vault_id = std::env::var("VAULT_ID").unwrap_or_else(|_| {
        tracing::error!("VAULT_ID environment variable is required");
        std::process::exit(1);
    });

    let location = std::env::var("VAULT_LOCATION").ok();

    let interval_secs: u64 = std::env::var("EVENT_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    let interval = Duration::from_secs(interval_secs);

    tracing::info!(
        vault_id = %vault_id,
        api_url = %api_url,
        interval_secs,
        "Starting vaultwatch-device",
    );

    sender::run(&api_url, &vault_id, location.as_deref(), interval).await;
}
