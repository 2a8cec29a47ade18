//! WebSocket handler for live table events.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws?player_id=<id>`
//! 2. The connection is registered with the hub and gets its own mailbox
//! 3. Two pumps run until the connection ends:
//!    - Outbound: writes each broadcast from the mailbox as a text frame
//!    - Inbound: drains client frames, only to notice the disconnect
//! 4. On disconnect the session is unregistered, which closes the mailbox
//!    and ends the outbound pump
//!
//! The `player_id` tag is informational. It does not have to match a seated
//! player, and disconnecting never frees a seat.
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8080/ws?player_id=alice');
//!
//! ws.onmessage = (event) => {
//!   const { event: name, data } = JSON.parse(event.data);
//!   if (name === 'player_joined') {
//!     seatPlayer(data.player_id, data.seat, data.chips);
//!   }
//! };
//! ```

use axum::{
    Json,
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use card_table::{
    SessionEntry,
    hub::{InboundFrame, OutboundFrame, inbound_pump, outbound_pump},
};
use futures_util::{SinkExt, StreamExt, future};
use log::{error, info, warn};
use serde::Deserialize;
use std::time::Instant;

use super::{AppState, tables::ErrorResponse};
use crate::{logging, metrics};

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    #[serde(default)]
    player_id: String,
}

/// Frame read from an axum WebSocket.
struct WsFrame(Message);

impl InboundFrame for WsFrame {
    fn is_close(&self) -> bool {
        matches!(self.0, Message::Close(_))
    }
}

fn to_ws_message(frame: OutboundFrame) -> future::Ready<Result<Message, axum::Error>> {
    let message = match frame {
        OutboundFrame::Text(payload) => {
            metrics::websocket_frame_sent();
            Message::Text(payload.into())
        }
        OutboundFrame::Close => Message::Close(None),
    };
    future::ready(Ok(message))
}

/// Upgrade HTTP connection to WebSocket for table events.
///
/// # Query Parameters
///
/// - `player_id`: Client tag, required and non-empty
///
/// # Response
///
/// On success, upgrades connection to WebSocket protocol (101 Switching
/// Protocols). A missing `player_id` yields `400 Bad Request` with
/// `{"error": "player_id query parameter is required"}`.
pub async fn websocket_handler(
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if query.player_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "player_id query parameter is required".to_string(),
            }),
        )
            .into_response();
    }

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let player_id = query.player_id;
    ws.on_upgrade(move |socket| handle_socket(socket, player_id, state))
}

/// Handle an established WebSocket connection until either side ends it.
async fn handle_socket(socket: WebSocket, player_id: String, state: AppState) {
    let started = Instant::now();

    let (entry, mailbox) = SessionEntry::open(player_id.clone(), state.mailbox_capacity);
    let session_id = entry.id;
    if state.hub.register(entry).await.is_err() {
        error!("Hub unavailable, dropping connection for {}", player_id);
        return;
    }

    metrics::websocket_connected();
    report_active_connections(&state).await;
    info!("WebSocket connected: session={}, player={}", session_id, player_id);

    let (sender, receiver) = socket.split();

    let send_task = tokio::spawn(async move {
        let sink = std::pin::pin!(sender.with(to_ws_message));
        outbound_pump(sink, mailbox, session_id).await;
    });

    inbound_pump(
        receiver.map(|frame| frame.map(WsFrame)),
        state.hub.clone(),
        session_id,
        &player_id,
    )
    .await;

    if let Err(e) = send_task.await {
        warn!("Outbound task for session {} failed: {}", session_id, e);
    }

    report_active_connections(&state).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    logging::log_connection_closed(&player_id, elapsed_ms);
}

async fn report_active_connections(state: &AppState) {
    if let Ok(count) = state.hub.session_count().await {
        metrics::websocket_sessions(count);
    }
}
