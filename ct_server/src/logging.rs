//! Structured logging configuration.
//!
//! The library crate logs through the `log` facade; those records are picked
//! up by the tracing subscriber installed here.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,hyper=warn,tower_http=warn";

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use ct_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // A second init (e.g. from tests) keeps the first subscriber.
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!("Structured logging initialized");
    }
}

/// Log a rejected seat request with structured fields
pub fn log_join_rejected(player_id: &str, buy_in: Option<i64>, reason: &str) {
    tracing::warn!(
        player_id = player_id,
        buy_in = buy_in,
        reason = reason,
        "Join rejected"
    );
}

/// Log a completed connection with its lifetime
pub fn log_connection_closed(player_id: &str, duration_ms: u64) {
    tracing::info!(
        player_id = player_id,
        duration_ms = duration_ms,
        "WebSocket connection closed"
    );
}
