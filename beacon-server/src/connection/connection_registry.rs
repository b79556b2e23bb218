use crate::connection::PeerSink;
use beacon_core::{ConnectionId, RoomId};
use std::collections::HashMap;
use std::sync::Arc;

/// What a connection is doing in its room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Unassigned,
    Broadcaster,
    Viewer,
}

pub struct Connection {
    sink: Arc<dyn PeerSink>,
    room: Option<RoomId>,
    role: Role,
}

/// Live connections keyed by their assigned identity.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, conn_id: ConnectionId, sink: Arc<dyn PeerSink>) {
        self.connections.insert(
            conn_id,
            Connection {
                sink,
                room: None,
                role: Role::Unassigned,
            },
        );
    }

    pub fn unregister(&mut self, conn_id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(conn_id)
    }

    pub fn contains(&self, conn_id: &ConnectionId) -> bool {
        self.connections.contains_key(conn_id)
    }

    pub fn set_role(&mut self, conn_id: &ConnectionId, role: Role) {
        if let Some(conn) = self.connections.get_mut(conn_id) {
            conn.role = role;
        }
    }

    pub fn set_room(&mut self, conn_id: &ConnectionId, room_id: Option<RoomId>) {
        if let Some(conn) = self.connections.get_mut(conn_id) {
            conn.room = room_id;
        }
    }

    /// Unknown connections read as `Unassigned`.
    pub fn role(&self, conn_id: &ConnectionId) -> Role {
        self.connections
            .get(conn_id)
            .map(|c| c.role)
            .unwrap_or_default()
    }

    pub fn room(&self, conn_id: &ConnectionId) -> Option<&RoomId> {
        self.connections.get(conn_id).and_then(|c| c.room.as_ref())
    }

    pub fn sink(&self, conn_id: &ConnectionId) -> Option<&Arc<dyn PeerSink>> {
        self.connections.get(conn_id).map(|c| &c.sink)
    }

    pub fn is_open(&self, conn_id: &ConnectionId) -> bool {
        self.sink(conn_id).is_some_and(|s| s.is_open())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Connection {
    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
