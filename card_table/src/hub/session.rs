//! Per-connection pumps bridging a transport to the hub.
//!
//! Each connection runs two pumps concurrently. The inbound pump drains
//! frames only to notice disconnection; the outbound pump delivers the
//! session mailbox. They talk to the hub and to each other only through
//! mailboxes.

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use tokio::sync::mpsc;

use super::{actor::HubHandle, messages::SessionId};

/// Frame written by the outbound pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Text(String),
    Close,
}

/// Classifies frames read from a transport.
pub trait InboundFrame {
    fn is_close(&self) -> bool;
}

/// Reads until the transport fails, closes, or ends, then unregisters the
/// session. Inbound payloads are not interpreted.
pub async fn inbound_pump<S, F, E>(
    mut stream: S,
    hub: HubHandle,
    session_id: SessionId,
    player_id: &str,
) where
    S: Stream<Item = Result<F, E>> + Unpin,
    F: InboundFrame,
    E: Display,
{
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(frame) if frame.is_close() => {
                log::info!("Session {} (player {}) closed by peer", session_id, player_id);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Session {} (player {}) read error: {}", session_id, player_id, e);
                break;
            }
        }
    }

    if hub.unregister(session_id).await.is_err() {
        log::debug!("Hub gone before session {} unregistered", session_id);
    }
}

/// Writes each mailbox payload as a text frame. Once the hub closes the
/// mailbox a close frame is sent; a write failure ends the pump without retry.
pub async fn outbound_pump<K>(mut sink: K, mut mailbox: mpsc::Receiver<String>, session_id: SessionId)
where
    K: Sink<OutboundFrame> + Unpin,
    K::Error: Display,
{
    while let Some(payload) = mailbox.recv().await {
        if let Err(e) = sink.send(OutboundFrame::Text(payload)).await {
            log::warn!("Session {} write error: {}", session_id, e);
            return;
        }
    }

    if let Err(e) = sink.send(OutboundFrame::Close).await {
        log::debug!("Session {} close frame not delivered: {}", session_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::{Hub, SessionEntry};
    use futures::{channel::mpsc as fmpsc, stream};

    #[derive(Debug)]
    enum TestFrame {
        Text,
        Close,
    }

    impl InboundFrame for TestFrame {
        fn is_close(&self) -> bool {
            matches!(self, TestFrame::Close)
        }
    }

    #[tokio::test]
    async fn test_inbound_close_unregisters() {
        let hub = Hub::spawn(8);
        let (entry, mut outbound) = SessionEntry::open("alice", 4);
        let id = entry.id;
        hub.register(entry).await.unwrap();

        let frames = stream::iter(vec![
            Ok::<_, String>(TestFrame::Text),
            Ok(TestFrame::Close),
            Ok(TestFrame::Text),
        ]);
        inbound_pump(frames, hub.clone(), id, "alice").await;

        assert_eq!(outbound.recv().await, None);
        assert_eq!(hub.session_count().await, Ok(0));
    }

    #[tokio::test]
    async fn test_inbound_error_unregisters() {
        let hub = Hub::spawn(8);
        let (entry, mut outbound) = SessionEntry::open("bob", 4);
        let id = entry.id;
        hub.register(entry).await.unwrap();

        let frames = stream::iter(vec![Ok(TestFrame::Text), Err("connection reset")]);
        inbound_pump(frames, hub.clone(), id, "bob").await;

        assert_eq!(outbound.recv().await, None);
    }

    #[tokio::test]
    async fn test_outbound_delivers_then_closes() {
        let (tx, rx) = mpsc::channel(4);
        let (sink, collected) = fmpsc::unbounded::<OutboundFrame>();

        tx.send("a".to_string()).await.unwrap();
        tx.send("b".to_string()).await.unwrap();
        drop(tx);

        outbound_pump(sink, rx, SessionId::new()).await;

        let frames: Vec<_> = collected.collect().await;
        assert_eq!(
            frames,
            vec![
                OutboundFrame::Text("a".to_string()),
                OutboundFrame::Text("b".to_string()),
                OutboundFrame::Close,
            ]
        );
    }

    #[tokio::test]
    async fn test_outbound_stops_on_write_failure() {
        let (tx, rx) = mpsc::channel(4);
        let (sink, collected) = fmpsc::unbounded::<OutboundFrame>();
        drop(collected);

        tx.send("lost".to_string()).await.unwrap();
        tx.send("never written".to_string()).await.unwrap();
        // Returns on the first failed write even though the mailbox is open
        outbound_pump(sink, rx, SessionId::new()).await;
        assert!(tx.is_closed());
    }
}
