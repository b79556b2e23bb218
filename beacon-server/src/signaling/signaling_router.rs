use crate::connection::{ConnectionRegistry, PeerSink, Role};
use crate::room::RoomTable;
use beacon_core::{ClientMessage, ConnectionId, RoomId, ServerMessage};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes signaling messages between the broadcaster and viewers of a room.
///
/// Owns the room table and the connection registry. Callers must serialize
/// access; `Relay` does so by running the router inside a single task.
#[derive(Default)]
pub struct SignalingRouter {
    pub(crate) rooms: RoomTable,
    pub(crate) connections: ConnectionRegistry,
}

impl SignalingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &RoomTable {
        &self.rooms
    }

    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }

    pub fn connect(&mut self, conn_id: ConnectionId, sink: Arc<dyn PeerSink>) {
        self.connections.register(conn_id, sink);
    }

    /// Decodes a raw text frame and routes it. Malformed frames are logged and dropped.
    pub fn handle_text(&mut self, conn_id: ConnectionId, text: &str) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => self.handle_message(conn_id, msg),
            Err(e) => warn!("Invalid message from {}: {}", conn_id.short(), e),
        }
    }

    pub fn handle_message(&mut self, conn_id: ConnectionId, msg: ClientMessage) {
        if !self.connections.contains(&conn_id) {
            warn!("Message from unknown connection {}", conn_id.short());
            return;
        }

        match msg {
            ClientMessage::CreateRoom { room_id } => self.create_room(conn_id, room_id),
            ClientMessage::JoinRoom { room_id } => self.join_room(conn_id, room_id),
            ClientMessage::Offer { room_id, sdp } => self.forward_offer(conn_id, room_id, sdp),
            ClientMessage::Answer { room_id, sdp } => self.forward_answer(conn_id, room_id, sdp),
            ClientMessage::IceCandidate { room_id, candidate } => {
                self.forward_ice_candidate(conn_id, room_id, candidate)
            }
            ClientMessage::Unknown => {}
        }
    }

    /// Switching to another room first leaves the current one, which closes
    /// it with `broadcaster-left` if this connection was broadcasting there.
    fn create_room(&mut self, conn_id: ConnectionId, room_id: RoomId) {
        let already_owner = self
            .rooms
            .lookup(&room_id)
            .is_some_and(|room| room.broadcaster() == conn_id);
        if !already_owner {
            self.leave_room(conn_id);
        }

        self.rooms.upsert_broadcaster(&room_id, conn_id);
        self.connections.set_role(&conn_id, Role::Broadcaster);
        self.connections.set_room(&conn_id, Some(room_id.clone()));
        info!("Room {} created by {}", room_id, conn_id.short());

        self.send_to(&conn_id, ServerMessage::RoomCreated { room_id });
    }

    fn join_room(&mut self, conn_id: ConnectionId, room_id: RoomId) {
        let Some(room) = self.rooms.lookup(&room_id) else {
            self.send_to(&conn_id, ServerMessage::room_not_found());
            return;
        };

        // The room's own broadcaster keeps its role; the room is left untouched.
        if room.broadcaster() == conn_id {
            debug!("Broadcaster {} re-joined room {}", conn_id.short(), room_id);
            self.send_to(&conn_id, ServerMessage::RoomJoined { room_id });
            return;
        }

        let already_viewer = room.has_viewer(&conn_id);
        if !already_viewer {
            self.leave_room(conn_id);
            if let Err(e) = self.rooms.add_viewer(&room_id, conn_id) {
                debug!("Join by {} failed: {}", conn_id.short(), e);
                self.send_to(&conn_id, ServerMessage::room_not_found());
                return;
            }
        }
        self.connections.set_role(&conn_id, Role::Viewer);
        self.connections.set_room(&conn_id, Some(room_id.clone()));
        info!(
            "{} joined room {} ({} viewers)",
            conn_id.short(),
            room_id,
            self.rooms.viewer_count(&room_id).unwrap_or_default()
        );

        self.send_to(&conn_id, ServerMessage::RoomJoined { room_id: room_id.clone() });
        self.notify_viewer_count(&room_id);
    }

    fn forward_offer(&self, conn_id: ConnectionId, room_id: RoomId, sdp: Value) {
        if self.rooms.lookup(&room_id).is_none() {
            return;
        }

        match self.connections.role(&conn_id) {
            Role::Broadcaster => self.send_to_viewers(&room_id, ServerMessage::Offer {
                sdp,
                room_id: room_id.clone(),
            }),
            role => debug!("Dropping offer from {} ({:?})", conn_id.short(), role),
        }
    }

    fn forward_answer(&self, conn_id: ConnectionId, room_id: RoomId, sdp: Value) {
        if self.rooms.lookup(&room_id).is_none() {
            return;
        }

        match self.connections.role(&conn_id) {
            Role::Viewer => self.send_to_broadcaster(&room_id, ServerMessage::Answer {
                sdp,
                room_id: room_id.clone(),
            }),
            role => debug!("Dropping answer from {} ({:?})", conn_id.short(), role),
        }
    }

    fn forward_ice_candidate(&self, conn_id: ConnectionId, room_id: RoomId, candidate: Value) {
        if self.rooms.lookup(&room_id).is_none() {
            return;
        }

        let msg = ServerMessage::IceCandidate {
            candidate,
            room_id: room_id.clone(),
        };
        match self.connections.role(&conn_id) {
            Role::Broadcaster => self.send_to_viewers(&room_id, msg),
            Role::Viewer => self.send_to_broadcaster(&room_id, msg),
            Role::Unassigned => {
                debug!("Dropping ice-candidate from unassigned {}", conn_id.short())
            }
        }
    }

    pub(crate) fn notify_viewer_count(&self, room_id: &RoomId) {
        let Some(count) = self.rooms.viewer_count(room_id) else {
            return;
        };
        self.send_to_broadcaster(room_id, ServerMessage::ViewerCount { count });
    }

    pub(crate) fn send_to_broadcaster(&self, room_id: &RoomId, msg: ServerMessage) {
        let Some(room) = self.rooms.lookup(room_id) else {
            return;
        };
        self.send_to(&room.broadcaster(), msg);
    }

    /// Fans a message out to every open viewer. A closed viewer is skipped,
    /// never removed; cleanup belongs to the disconnect path.
    pub(crate) fn send_to_viewers(&self, room_id: &RoomId, msg: ServerMessage) {
        let Some(room) = self.rooms.lookup(room_id) else {
            return;
        };
        for viewer in room.viewers() {
            self.send_to(viewer, msg.clone());
        }
    }

    pub(crate) fn send_to(&self, conn_id: &ConnectionId, msg: ServerMessage) -> bool {
        let Some(sink) = self.connections.sink(conn_id) else {
            debug!("Skipping send to unregistered {}", conn_id.short());
            return false;
        };
        if !sink.is_open() {
            debug!("Skipping send to closed {}", conn_id.short());
            return false;
        }
        match sink.send(msg) {
            Ok(()) => true,
            Err(e) => {
                debug!("Send to {} failed: {}", conn_id.short(), e);
                false
            }
        }
    }
}
