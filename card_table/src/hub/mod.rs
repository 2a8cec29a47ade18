//! Connection registry.
//!
//! The hub owns the set of live client sessions. Register, unregister and
//! broadcast requests are serialized through one bounded inbox consumed by a
//! single worker task, so the session set needs no lock.
//!
//! ## Example
//!
//! ```
//! use card_table::hub::{Hub, SessionEntry};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let hub = Hub::spawn(100);
//! let (session, mut outbound) = SessionEntry::open("alice", 256);
//! hub.register(session).await.unwrap();
//! hub.broadcast("hello".to_string()).await.unwrap();
//! assert_eq!(outbound.recv().await.as_deref(), Some("hello"));
//! # }
//! ```

pub mod actor;
pub mod messages;
pub mod session;

pub use actor::{DEFAULT_INBOX_CAPACITY, DEFAULT_MAILBOX_CAPACITY, Hub, HubError, HubHandle};
pub use messages::{HubMessage, PlayerJoined, SessionEntry, SessionId, TableEvent};
pub use session::{InboundFrame, OutboundFrame, inbound_pump, outbound_pump};
