//! `vaultwatch-api` library crate.
//!
//! Exposes the router, state, and WebSocket infrastructure for
//! integration testing. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
pub mod ws;
