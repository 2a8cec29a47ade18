//! HTTP/WebSocket API for the card table server.
//!
//! # Endpoints Overview
//!
//! - `GET /ws?player_id=<id>` - Live connection receiving table events
//! - `POST /api/join-table` - Take a seat with a buy-in
//! - `GET /api/table` - Seated players and table limits
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use ct_server::{api::{create_router, AppState}, config::ServerConfig};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let state = AppState::from_config(&ServerConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! CORS is permissive; browsers may call the API from any origin.

pub mod request_id;
pub mod tables;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use card_table::{Hub, HubHandle, Table};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;

/// Application state shared across all HTTP handlers and WebSocket connections.
///
/// The hub and the table are independent resources: the hub owns live
/// connections, the table owns seats. Handlers that need both take the table
/// lock first and publish through the hub while holding it.
#[derive(Clone)]
pub struct AppState {
    pub hub: HubHandle,
    pub table: Arc<Table>,
    /// Outbound mailbox capacity given to each new connection
    pub mailbox_capacity: usize,
}

impl AppState {
    /// Spawns the hub worker and creates the table. Must be called from
    /// within a tokio runtime.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            hub: Hub::spawn(config.hub_inbox_capacity),
            table: Arc::new(Table::new(config.table.clone())),
            mailbox_capacity: config.session_mailbox_capacity,
        }
    }
}

/// Builds the router: table and WebSocket routes behind request-id tagging
/// and CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .route("/api/join-table", post(tables::join_table))
        .route("/api/table", get(tables::get_table))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` while the hub worker answers, `503 Service Unavailable`
/// once it has stopped.
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"healthy","version":"0.1.0","sessions":2,"players":1,"timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let sessions = state.hub.session_count().await.ok();
    let players = state.table.player_count().await;

    let healthy = sessions.is_some();
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": sessions,
        "players": players,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
