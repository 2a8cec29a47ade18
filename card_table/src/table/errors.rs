//! Seating error types.

use thiserror::Error;

/// Reasons a seat request is turned down. None of these are fatal; the
/// messages are surfaced to clients verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SeatError {
    /// Empty player id
    #[error("player_id is required")]
    MissingPlayerId,

    /// Buy-in outside the table limits
    #[error("buy-in must be between {min} and {max} chips")]
    InvalidBuyIn { min: i64, max: i64 },

    /// Requested seat number does not exist
    #[error("seat number must be between 1 and {max}")]
    SeatOutOfRange { max: u8 },

    /// Requested seat already taken
    #[error("seat {0} is already occupied")]
    SeatOccupied(u8),

    /// Every seat taken
    #[error("table is full")]
    TableFull,
}

impl SeatError {
    /// State conflicts (as opposed to malformed requests).
    pub fn is_conflict(&self) -> bool {
        matches!(self, SeatError::SeatOccupied(_) | SeatError::TableFull)
    }
}

/// Result type for seating operations
pub type SeatResult<T> = Result<T, SeatError>;
