use crate::connection::Role;
use crate::signaling::SignalingRouter;
use beacon_core::{ConnectionId, RoomId, ServerMessage};
use tracing::{debug, info};

impl SignalingRouter {
    /// Transport-level close. Runs once per connection.
    pub fn disconnect(&mut self, conn_id: ConnectionId) {
        let Some(conn) = self.connections.unregister(&conn_id) else {
            return;
        };
        let Some(room_id) = conn.room() else {
            return;
        };
        self.release(conn_id, conn.role(), room_id);
    }

    /// Detaches an assigned connection from its current room before it is reassigned.
    pub(crate) fn leave_room(&mut self, conn_id: ConnectionId) {
        let role = self.connections.role(&conn_id);
        let Some(room_id) = self.connections.room(&conn_id).cloned() else {
            return;
        };
        self.connections.set_role(&conn_id, Role::Unassigned);
        self.connections.set_room(&conn_id, None);
        self.release(conn_id, role, &room_id);
    }

    fn release(&mut self, conn_id: ConnectionId, role: Role, room_id: &RoomId) {
        let Some(room) = self.rooms.lookup(room_id) else {
            return;
        };

        match role {
            Role::Broadcaster => {
                if room.broadcaster() != conn_id {
                    debug!(
                        "Superseded broadcaster {} left room {}",
                        conn_id.short(),
                        room_id
                    );
                    return;
                }

                let viewers = room.viewers().to_vec();
                for viewer in &viewers {
                    self.send_to(viewer, ServerMessage::BroadcasterLeft);
                }
                self.rooms.delete_room(room_id);

                for viewer in &viewers {
                    self.connections.set_role(viewer, Role::Unassigned);
                    self.connections.set_room(viewer, None);
                }
                info!(
                    "Broadcaster {} left, room {} closed ({} viewers orphaned)",
                    conn_id.short(),
                    room_id,
                    viewers.len()
                );
            }
            Role::Viewer => {
                self.rooms.remove_viewer(room_id, &conn_id);
                debug!("Viewer {} left room {}", conn_id.short(), room_id);
                self.notify_viewer_count(room_id);
            }
            Role::Unassigned => {}
        }
    }
}
