use beacon_core::ConnectionId;

/// One broadcaster and the viewers that joined after it, in join order.
///
/// Holds identities only; the transport owns the connections themselves.
#[derive(Debug, Clone)]
pub struct Room {
    broadcaster: ConnectionId,
    viewers: Vec<ConnectionId>,
}

impl Room {
    pub(crate) fn new(broadcaster: ConnectionId) -> Self {
        Self {
            broadcaster,
            viewers: Vec::new(),
        }
    }

    pub fn broadcaster(&self) -> ConnectionId {
        self.broadcaster
    }

    pub fn viewers(&self) -> &[ConnectionId] {
        &self.viewers
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    pub fn has_viewer(&self, conn_id: &ConnectionId) -> bool {
        self.viewers.contains(conn_id)
    }

    pub(crate) fn set_broadcaster(&mut self, conn_id: ConnectionId) {
        self.broadcaster = conn_id;
    }

    pub(crate) fn push_viewer(&mut self, conn_id: ConnectionId) {
        self.viewers.push(conn_id);
    }

    pub(crate) fn remove_viewer(&mut self, conn_id: &ConnectionId) -> bool {
        let Some(index) = self.viewers.iter().position(|v| v == conn_id) else {
            return false;
        };
        self.viewers.remove(index);
        true
    }
}
