use axum::extract::ws::Message;
use beacon_core::ServerMessage;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("peer channel is closed")]
    Closed,
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Outbound half of a peer connection, as seen by the router.
///
/// Implemented by the WebSocket front door; tests plug in their own sinks.
pub trait PeerSink: Send + Sync {
    /// Whether the peer can still receive messages.
    fn is_open(&self) -> bool;

    /// Queue a message for delivery. Never waits on the peer.
    fn send(&self, msg: ServerMessage) -> Result<(), SendError>;
}

/// Sink feeding the writer task of a WebSocket connection.
pub struct WsPeerSink {
    tx: mpsc::UnboundedSender<Message>,
}

impl WsPeerSink {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

impl PeerSink for WsPeerSink {
    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send(&self, msg: ServerMessage) -> Result<(), SendError> {
        let json = serde_json::to_string(&msg)?;
        self.tx
            .send(Message::Text(json.into()))
            .map_err(|_| SendError::Closed)
    }
}
