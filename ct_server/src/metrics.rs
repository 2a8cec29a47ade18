//! Prometheus metrics for the table server.
//!
//! Recording goes through the `metrics` facade and costs nothing until
//! [`init_metrics`] installs the exporter, which serves the Prometheus text
//! format at `http://<addr>/metrics`.
//!
//! ```rust,no_run
//! use ct_server::metrics;
//! use std::net::SocketAddr;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//! metrics::players_seated(3);
//! # }
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter on {}: {}", addr, e))
}

// ============================================================================
// HTTP
// ============================================================================

/// Count one completed request and record how long it took.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_ms: f64) {
    metrics::counter!("card_table_http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("card_table_http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Connections
// ============================================================================

pub fn websocket_connected() {
    metrics::counter!("card_table_ws_connections_total").increment(1);
}

/// Sessions currently registered with the hub.
pub fn websocket_sessions(count: usize) {
    metrics::gauge!("card_table_ws_sessions").set(count as f64);
}

/// One event frame written to a connection.
pub fn websocket_frame_sent() {
    metrics::counter!("card_table_ws_frames_sent_total").increment(1);
}

// ============================================================================
// Seating
// ============================================================================

pub fn players_seated(count: usize) {
    metrics::gauge!("card_table_players_seated").set(count as f64);
}

/// Count a refused join, labelled with a stable reason code.
pub fn join_rejected(reason: &'static str) {
    metrics::counter!("card_table_join_rejections_total", "reason" => reason).increment(1);
}
