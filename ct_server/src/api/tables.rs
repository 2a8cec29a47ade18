//! Table API handlers.
//!
//! # Examples
//!
//! Join the table:
//! ```bash
//! curl -X POST http://localhost:8080/api/join-table \
//!   -H "Content-Type: application/json" \
//!   -d '{"player_id": "alice", "buy_in": 500}'
//! ```
//!
//! Inspect the table:
//! ```bash
//! curl http://localhost:8080/api/table
//! ```

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use card_table::{Player, SeatError, TableEvent, hub::PlayerJoined};
use serde::{Deserialize, Serialize};

use super::{AppState, request_id::RequestId};
use crate::{logging, metrics};

#[derive(Debug, Deserialize)]
pub struct JoinTableRequest {
    #[serde(default)]
    pub player_id: String,
    /// Preferred seat; the lowest free seat when absent
    #[serde(default)]
    pub seat: Option<i64>,
    #[serde(default)]
    pub buy_in: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinTableResponse {
    pub success: bool,
    pub seat: u8,
    pub chips: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TableStateResponse {
    pub name: String,
    pub max_seats: u8,
    pub min_buy_in: i64,
    pub max_buy_in: i64,
    pub players: Vec<Player>,
    pub open_seats: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

fn rejection_label(error: &SeatError) -> &'static str {
    match error {
        SeatError::MissingPlayerId => "missing_player_id",
        SeatError::InvalidBuyIn { .. } => "invalid_buy_in",
        SeatError::SeatOutOfRange { .. } => "seat_out_of_range",
        SeatError::SeatOccupied(_) => "seat_occupied",
        SeatError::TableFull => "table_full",
    }
}

/// Seat a player at the table.
///
/// # Request Body
///
/// ```json
/// {
///   "player_id": "alice",
///   "seat": 3,
///   "buy_in": 500
/// }
/// ```
///
/// # Response
///
/// Returns `200 OK` with the assignment and broadcasts `player_joined` to
/// every live connection. Joining again with the same `player_id` returns
/// the existing assignment unchanged (and announces it again).
///
/// # Errors
///
/// - `400 Bad Request`: malformed body, missing `player_id`, non-positive or
///   out-of-range buy-in, bad or occupied seat, full table
pub async fn join_table(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<JoinTableRequest>, JsonRejection>,
) -> Result<Json<JoinTableResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        log::debug!(
            "Join request {} body rejected: {}",
            request_id.as_str(),
            rejection
        );
        metrics::join_rejected("invalid_body");
        bad_request("Invalid request body")
    })?;

    if request.player_id.is_empty() {
        metrics::join_rejected("missing_player_id");
        return Err(bad_request(SeatError::MissingPlayerId.to_string()));
    }

    let buy_in = match request.buy_in {
        Some(buy_in) if buy_in > 0 => buy_in,
        _ => {
            metrics::join_rejected("missing_buy_in");
            return Err(bad_request("buy_in is required and must be positive"));
        }
    };

    // The announcement goes out before the lock is released, so every
    // connection sees joins in the order they were granted.
    let mut seats = state.table.lock().await;
    let player = match seats.add_player(&request.player_id, request.seat, buy_in) {
        Ok(player) => player,
        Err(e) => {
            drop(seats);
            let reason = e.to_string();
            logging::log_join_rejected(&request.player_id, Some(buy_in), &reason);
            metrics::join_rejected(rejection_label(&e));
            return Err(bad_request(reason));
        }
    };

    let event = TableEvent::PlayerJoined(PlayerJoined::from(&player));
    if let Err(e) = state.hub.publish(&event).await {
        log::error!("Failed to announce {} joining: {}", player.player_id, e);
    }
    metrics::players_seated(seats.len());
    drop(seats);

    Ok(Json(JoinTableResponse {
        success: true,
        seat: player.seat,
        chips: player.chips,
    }))
}

/// Get the table's limits and seated players, ordered by seat.
pub async fn get_table(State(state): State<AppState>) -> Json<TableStateResponse> {
    let config = state.table.config();
    let seats = state.table.lock().await;

    Json(TableStateResponse {
        name: config.name.clone(),
        max_seats: config.max_seats,
        min_buy_in: config.min_buy_in,
        max_buy_in: config.max_buy_in,
        players: seats.players(),
        open_seats: seats.open_seats(),
    })
}
