//! Hub actor implementation with async message handling.

use super::messages::{HubMessage, SessionEntry, SessionId, TableEvent};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Default capacity of the hub inbox.
pub const DEFAULT_INBOX_CAPACITY: usize = 100;

/// Default capacity of each session's outbound mailbox.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 256;

/// Hub errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HubError {
    /// The hub worker has stopped
    #[error("Hub is closed")]
    Closed,
}

/// Hub handle for sending messages
#[derive(Clone, Debug)]
pub struct HubHandle {
    sender: mpsc::Sender<HubMessage>,
}

impl HubHandle {
    /// Send a raw message to the hub
    pub async fn send(&self, message: HubMessage) -> Result<(), HubError> {
        self.sender.send(message).await.map_err(|_| HubError::Closed)
    }

    pub async fn register(&self, session: SessionEntry) -> Result<(), HubError> {
        self.send(HubMessage::Register(session)).await
    }

    pub async fn unregister(&self, session_id: SessionId) -> Result<(), HubError> {
        self.send(HubMessage::Unregister { session_id }).await
    }

    pub async fn broadcast(&self, payload: String) -> Result<(), HubError> {
        self.send(HubMessage::Broadcast { payload }).await
    }

    /// Encode `event` and broadcast it. An event that fails to encode is
    /// logged and skipped.
    pub async fn publish(&self, event: &TableEvent) -> Result<(), HubError> {
        match event.encode() {
            Ok(payload) => self.broadcast(payload).await,
            Err(e) => {
                log::error!("Failed to encode table event {:?}: {}", event, e);
                Ok(())
            }
        }
    }

    /// Number of sessions currently registered
    pub async fn session_count(&self) -> Result<usize, HubError> {
        let (tx, rx) = oneshot::channel();
        self.send(HubMessage::SessionCount { response: tx }).await?;
        rx.await.map_err(|_| HubError::Closed)
    }
}

/// Registry of live client sessions.
///
/// A single worker drains the inbox, so the session map needs no lock. The
/// worker stops once every [`HubHandle`] has been dropped; dropping the hub
/// closes every remaining mailbox.
pub struct Hub {
    /// Message inbox
    inbox: mpsc::Receiver<HubMessage>,

    /// Live sessions
    sessions: HashMap<SessionId, SessionEntry>,
}

impl Hub {
    /// Create a new hub
    ///
    /// # Arguments
    ///
    /// * `inbox_capacity` - Capacity of the hub inbox
    ///
    /// # Returns
    ///
    /// * `(Hub, HubHandle)` - Hub and handle for sending messages
    pub fn new(inbox_capacity: usize) -> (Self, HubHandle) {
        let (sender, inbox) = mpsc::channel(inbox_capacity.max(1));

        let hub = Self {
            inbox,
            sessions: HashMap::new(),
        };

        (hub, HubHandle { sender })
    }

    /// Create a hub and run it on the current tokio runtime
    pub fn spawn(inbox_capacity: usize) -> HubHandle {
        let (hub, handle) = Self::new(inbox_capacity);
        tokio::spawn(hub.run());
        handle
    }

    /// Run the hub event loop
    pub async fn run(mut self) {
        log::info!("Hub starting");

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
        }

        log::info!("Hub stopped with {} live sessions", self.sessions.len());
    }

    fn handle_message(&mut self, message: HubMessage) {
        match message {
            HubMessage::Register(session) => self.register(session),
            HubMessage::Unregister { session_id } => self.unregister(session_id),
            HubMessage::Broadcast { payload } => self.broadcast(&payload),
            HubMessage::SessionCount { response } => {
                let _ = response.send(self.sessions.len());
            }
        }
    }

    fn register(&mut self, session: SessionEntry) {
        log::info!(
            "Session registered: {} (player {})",
            session.id,
            session.player_id
        );
        self.sessions.insert(session.id, session);
    }

    fn unregister(&mut self, session_id: SessionId) {
        // Dropping the entry drops the mailbox sender, which ends the
        // session's outbound pump.
        if let Some(session) = self.sessions.remove(&session_id) {
            let connected_for = chrono::Utc::now() - session.connected_at;
            log::info!(
                "Session unregistered: {} (player {}, connected {}s)",
                session.id,
                session.player_id,
                connected_for.num_seconds()
            );
        }
    }

    /// Non-blocking fan-out. A session whose mailbox is full (or already
    /// closed) is dropped instead of stalling the table.
    fn broadcast(&mut self, payload: &str) {
        self.sessions.retain(|id, session| {
            match session.mailbox.try_send(payload.to_string()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!(
                        "Session {} (player {}) mailbox full, disconnecting",
                        id,
                        session.player_id
                    );
                    false
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Session {} already gone, removing", id);
                    false
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_count() {
        let hub = Hub::spawn(DEFAULT_INBOX_CAPACITY);
        let (a, _rx_a) = SessionEntry::open("alice", 4);
        let (b, _rx_b) = SessionEntry::open("bob", 4);
        hub.register(a).await.unwrap();
        hub.register(b).await.unwrap();
        assert_eq!(hub.session_count().await, Ok(2));
    }

    #[tokio::test]
    async fn test_unregister_closes_mailbox() {
        let hub = Hub::spawn(DEFAULT_INBOX_CAPACITY);
        let (entry, mut rx) = SessionEntry::open("alice", 4);
        let id = entry.id;
        hub.register(entry).await.unwrap();
        hub.unregister(id).await.unwrap();
        assert_eq!(rx.recv().await, None);

        // Second unregister is tolerated
        hub.unregister(id).await.unwrap();
        assert_eq!(hub.session_count().await, Ok(0));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_everyone() {
        let hub = Hub::spawn(DEFAULT_INBOX_CAPACITY);
        let (a, mut rx_a) = SessionEntry::open("alice", 4);
        let (b, mut rx_b) = SessionEntry::open("bob", 4);
        hub.register(a).await.unwrap();
        hub.register(b).await.unwrap();

        hub.broadcast("hello".to_string()).await.unwrap();
        assert_eq!(rx_a.recv().await.as_deref(), Some("hello"));
        assert_eq!(rx_b.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_full_mailbox_is_evicted() {
        let hub = Hub::spawn(DEFAULT_INBOX_CAPACITY);
        let (slow, mut rx_slow) = SessionEntry::open("slow", 1);
        let (fast, mut rx_fast) = SessionEntry::open("fast", 8);
        hub.register(slow).await.unwrap();
        hub.register(fast).await.unwrap();

        hub.broadcast("one".to_string()).await.unwrap();
        hub.broadcast("two".to_string()).await.unwrap();
        assert_eq!(hub.session_count().await, Ok(1));

        // The slow session keeps what it had, then sees its mailbox closed
        assert_eq!(rx_slow.recv().await.as_deref(), Some("one"));
        assert_eq!(rx_slow.recv().await, None);

        hub.broadcast("three".to_string()).await.unwrap();
        assert_eq!(rx_fast.recv().await.as_deref(), Some("one"));
        assert_eq!(rx_fast.recv().await.as_deref(), Some("two"));
        assert_eq!(rx_fast.recv().await.as_deref(), Some("three"));
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_removed() {
        let hub = Hub::spawn(DEFAULT_INBOX_CAPACITY);
        let (entry, rx) = SessionEntry::open("ghost", 4);
        hub.register(entry).await.unwrap();
        drop(rx);
        hub.broadcast("anyone?".to_string()).await.unwrap();
        assert_eq!(hub.session_count().await, Ok(0));
    }

    #[tokio::test]
    async fn test_handle_errors_after_hub_stops() {
        let (hub, handle) = Hub::new(4);
        drop(hub);
        assert_eq!(handle.broadcast("x".to_string()).await, Err(HubError::Closed));
        assert_eq!(handle.session_count().await, Err(HubError::Closed));
    }
}
