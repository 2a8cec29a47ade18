//! Seat assignment for a single table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::{Mutex, MutexGuard};

use super::{
    config::TableConfig,
    errors::{SeatError, SeatResult},
};

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub seat: u8,
    pub chips: i64,
}

/// Seat ledger guarded by [`Table`]. One entry per player id, and no two
/// entries share a seat number.
#[derive(Debug)]
pub struct SeatMap {
    config: TableConfig,
    players: HashMap<String, Player>,
}

impl SeatMap {
    fn new(config: TableConfig) -> Self {
        Self {
            config,
            players: HashMap::new(),
        }
    }

    fn is_occupied(&self, seat: u8) -> bool {
        self.players.values().any(|p| p.seat == seat)
    }

    /// Seats `player_id` with `buy_in` chips.
    ///
    /// A player that already holds a seat gets the existing assignment back
    /// untouched, whatever seat or buy-in the repeat request carries. Without
    /// a preferred seat the lowest free seat is taken.
    pub fn add_player(
        &mut self,
        player_id: &str,
        preferred_seat: Option<i64>,
        buy_in: i64,
    ) -> SeatResult<Player> {
        if player_id.is_empty() {
            return Err(SeatError::MissingPlayerId);
        }

        if !self.config.accepts_buy_in(buy_in) {
            return Err(SeatError::InvalidBuyIn {
                min: self.config.min_buy_in,
                max: self.config.max_buy_in,
            });
        }

        if let Some(existing) = self.players.get(player_id) {
            log::debug!(
                "Player {} already seated at {} on table '{}'",
                player_id,
                existing.seat,
                self.config.name
            );
            return Ok(existing.clone());
        }

        // A full table rejects newcomers before any seat request is looked at.
        if self.players.len() >= usize::from(self.config.max_seats) {
            return Err(SeatError::TableFull);
        }

        let seat = match preferred_seat {
            Some(requested) => {
                let seat = u8::try_from(requested)
                    .ok()
                    .filter(|s| self.config.has_seat(*s))
                    .ok_or(SeatError::SeatOutOfRange {
                        max: self.config.max_seats,
                    })?;
                if self.is_occupied(seat) {
                    return Err(SeatError::SeatOccupied(seat));
                }
                seat
            }
            None => (1..=self.config.max_seats)
                .find(|s| !self.is_occupied(*s))
                .ok_or(SeatError::TableFull)?,
        };

        let player = Player {
            player_id: player_id.to_string(),
            seat,
            chips: buy_in,
        };
        self.players.insert(player.player_id.clone(), player.clone());

        log::info!(
            "Player {} took seat {} on table '{}' with {} chips",
            player.player_id,
            player.seat,
            self.config.name,
            player.chips
        );

        Ok(player)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    /// Seated players ordered by seat number.
    pub fn players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by_key(|p| p.seat);
        players
    }

    /// Occupied seat numbers, ascending.
    pub fn occupied_seats(&self) -> Vec<u8> {
        let mut seats: Vec<u8> = self.players.values().map(|p| p.seat).collect();
        seats.sort_unstable();
        seats
    }

    pub fn open_seats(&self) -> Vec<u8> {
        (1..=self.config.max_seats)
            .filter(|s| !self.is_occupied(*s))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// One table's seating. Every operation holds the table lock for its whole
/// duration, so seat assignment is serialized across callers.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    seats: Mutex<SeatMap>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        Self {
            seats: Mutex::new(SeatMap::new(config.clone())),
            config,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Takes the table lock. Holding the guard while announcing a join keeps
    /// announcements in the same order as the joins.
    pub async fn lock(&self) -> MutexGuard<'_, SeatMap> {
        self.seats.lock().await
    }

    /// See [`SeatMap::add_player`].
    pub async fn add_player(
        &self,
        player_id: &str,
        preferred_seat: Option<i64>,
        buy_in: i64,
    ) -> SeatResult<Player> {
        self.lock()
            .await
            .add_player(player_id, preferred_seat, buy_in)
    }

    pub async fn player(&self, player_id: &str) -> Option<Player> {
        self.lock().await.player(player_id).cloned()
    }

    pub async fn players(&self) -> Vec<Player> {
        self.lock().await.players()
    }

    pub async fn occupied_seats(&self) -> Vec<u8> {
        self.lock().await.occupied_seats()
    }

    pub async fn open_seats(&self) -> Vec<u8> {
        self.lock().await.open_seats()
    }

    pub async fn player_count(&self) -> usize {
        self.lock().await.len()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}
