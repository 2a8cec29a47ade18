//! HTTP/WebSocket front end for a single card table.
//!
//! Wires the [`card_table`] hub and table into an axum router. The binary in
//! `main.rs` only loads configuration and serves the router.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
