//! Hub mailbox message types and table events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::table::Player;

/// Identity of one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry entry for one live connection. Owned by the hub while registered;
/// dropping it closes the session's outbound mailbox.
#[derive(Debug)]
pub struct SessionEntry {
    pub id: SessionId,
    /// Client-supplied tag, used for logging only
    pub player_id: String,
    pub mailbox: mpsc::Sender<String>,
    pub connected_at: DateTime<Utc>,
}

impl SessionEntry {
    /// Opens a session with a bounded outbound mailbox of `capacity` payloads.
    /// The receiver feeds the session's outbound pump.
    pub fn open(player_id: impl Into<String>, capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (mailbox, outbound) = mpsc::channel(capacity.max(1));
        let entry = Self {
            id: SessionId::new(),
            player_id: player_id.into(),
            mailbox,
            connected_at: Utc::now(),
        };
        (entry, outbound)
    }
}

/// Messages consumed by the hub worker
#[derive(Debug)]
pub enum HubMessage {
    /// Add a session to the live set
    Register(SessionEntry),

    /// Remove a session and close its mailbox; no-op when absent
    Unregister { session_id: SessionId },

    /// Deliver an encoded payload to every live session
    Broadcast { payload: String },

    /// Number of live sessions
    SessionCount { response: oneshot::Sender<usize> },
}

/// Payload of the `player_joined` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerJoined {
    pub player_id: String,
    pub seat: u8,
    pub chips: i64,
}

impl From<&Player> for PlayerJoined {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.player_id.clone(),
            seat: player.seat,
            chips: player.chips,
        }
    }
}

/// Table events fanned out to every connected client.
///
/// Encoded as `{"event": "<name>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum TableEvent {
    PlayerJoined(PlayerJoined),
}

impl TableEvent {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_joined_wire_shape() {
        let player = Player {
            player_id: "alice".to_string(),
            seat: 1,
            chips: 500,
        };
        let event = TableEvent::PlayerJoined(PlayerJoined::from(&player));
        let value: serde_json::Value = serde_json::from_str(&event.encode().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"event": "player_joined", "data": {"player_id": "alice", "seat": 1, "chips": 500}})
        );
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[tokio::test]
    async fn test_open_session_mailbox() {
        let (entry, mut outbound) = SessionEntry::open("bob", 4);
        assert_eq!(entry.player_id, "bob");
        entry.mailbox.try_send("hi".to_string()).unwrap();
        assert_eq!(outbound.recv().await.as_deref(), Some("hi"));
        drop(entry);
        assert_eq!(outbound.recv().await, None);
    }
}
