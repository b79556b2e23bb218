use crate::room::{Room, RoomError};
use beacon_core::{ConnectionId, RoomId};
use std::collections::HashMap;
use tracing::debug;

/// Every live room, keyed by the caller-supplied id.
///
/// All structural changes to rooms go through here. Nothing in this layer
/// talks to peers.
#[derive(Default)]
pub struct RoomTable {
    rooms: HashMap<RoomId, Room>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the room, or hands an existing one to a new broadcaster.
    /// The previous broadcaster is not told.
    pub fn upsert_broadcaster(&mut self, room_id: &RoomId, conn_id: ConnectionId) {
        match self.rooms.get_mut(room_id) {
            Some(room) => {
                debug!(
                    "Room {} broadcaster replaced: {} -> {}",
                    room_id,
                    room.broadcaster().short(),
                    conn_id.short()
                );
                room.set_broadcaster(conn_id);
            }
            None => {
                self.rooms.insert(room_id.clone(), Room::new(conn_id));
            }
        }
    }

    pub fn lookup(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Appends a viewer and returns the new viewer count.
    pub fn add_viewer(
        &mut self,
        room_id: &RoomId,
        conn_id: ConnectionId,
    ) -> Result<usize, RoomError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.clone()))?;
        room.push_viewer(conn_id);
        Ok(room.viewer_count())
    }

    /// Removes the first matching viewer. Returns whether one was removed.
    pub fn remove_viewer(&mut self, room_id: &RoomId, conn_id: &ConnectionId) -> bool {
        self.rooms
            .get_mut(room_id)
            .is_some_and(|room| room.remove_viewer(conn_id))
    }

    pub fn delete_room(&mut self, room_id: &RoomId) -> Option<Room> {
        self.rooms.remove(room_id)
    }

    pub fn viewer_count(&self, room_id: &RoomId) -> Option<usize> {
        self.rooms.get(room_id).map(Room::viewer_count)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
