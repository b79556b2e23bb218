use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages a peer sends to the relay.
///
/// `sdp` and `candidate` are carried as opaque JSON; the relay never looks inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateRoom {
        room_id: RoomId,
    },
    JoinRoom {
        room_id: RoomId,
    },
    Offer {
        room_id: RoomId,
        sdp: Value,
    },
    Answer {
        room_id: RoomId,
        sdp: Value,
    },
    IceCandidate {
        room_id: RoomId,
        candidate: Value,
    },
    /// Any `type` the relay does not know about.
    #[serde(other)]
    Unknown,
}

/// Messages the relay sends to a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    RoomCreated {
        room_id: RoomId,
    },
    RoomJoined {
        room_id: RoomId,
    },
    Error {
        message: String,
    },
    ViewerCount {
        count: usize,
    },
    Offer {
        sdp: Value,
        room_id: RoomId,
    },
    Answer {
        sdp: Value,
        room_id: RoomId,
    },
    IceCandidate {
        candidate: Value,
        room_id: RoomId,
    },
    BroadcasterLeft,
}

impl ServerMessage {
    pub fn room_not_found() -> Self {
        ServerMessage::Error {
            message: "Room not found".to_string(),
        }
    }
}
