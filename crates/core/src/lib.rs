//! `vaultwatch-core` -- domain types shared across the backend.
//!
//! Pure logic only: event classification, record shapes, alert derivation,
//! and the shared error type. No I/O lives here.

pub mod alert;
pub mod classification;
pub mod error;
pub mod event;
pub mod message_types;
pub mod types;
