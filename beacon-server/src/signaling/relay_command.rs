use crate::connection::PeerSink;
use crate::room::Room;
use beacon_core::{ConnectionId, RoomId};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Commands delivered to the relay from the transport layer.
pub enum RelayCommand {
    /// A transport connection was accepted.
    Connect {
        conn_id: ConnectionId,
        sink: Arc<dyn PeerSink>,
    },

    /// A text frame arrived from a peer.
    Inbound { conn_id: ConnectionId, text: String },

    /// The transport connection closed.
    Disconnect { conn_id: ConnectionId },

    /// Read-only view of a room, used by tests.
    Inspect {
        room_id: RoomId,
        reply: oneshot::Sender<Option<Room>>,
    },
}
