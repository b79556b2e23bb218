use crate::connection::PeerSink;
use crate::room::Room;
use crate::signaling::{RelayCommand, SignalingRouter};
use beacon_core::{ConnectionId, RoomId};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

#[derive(Debug, Error)]
#[error("relay task has stopped")]
pub struct RelayClosed;

/// Single task owning all room and connection state.
///
/// Commands are applied one at a time, so forwarding always sees a consistent
/// room.
pub struct Relay {
    router: SignalingRouter,
    command_rx: mpsc::Receiver<RelayCommand>,
}

impl Relay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>) -> Self {
        Self::with_router(SignalingRouter::new(), command_rx)
    }

    pub fn with_router(router: SignalingRouter, command_rx: mpsc::Receiver<RelayCommand>) -> Self {
        Self { router, command_rx }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Relay event loop finished");
    }

    fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Connect { conn_id, sink } => self.router.connect(conn_id, sink),
            RelayCommand::Inbound { conn_id, text } => self.router.handle_text(conn_id, &text),
            RelayCommand::Disconnect { conn_id } => self.router.disconnect(conn_id),
            RelayCommand::Inspect { room_id, reply } => {
                let _ = reply.send(self.router.rooms().lookup(&room_id).cloned());
            }
        }
    }
}

/// Cloneable entry point into a running [`Relay`].
#[derive(Clone)]
pub struct RelayHandle {
    command_tx: mpsc::Sender<RelayCommand>,
}

impl RelayHandle {
    pub fn new(command_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self { command_tx }
    }

    /// Spawns a relay on the current runtime. A capacity of zero is raised to one.
    pub fn spawn(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(Relay::new(rx).run());
        Self::new(tx)
    }

    pub async fn connect(
        &self,
        conn_id: ConnectionId,
        sink: Arc<dyn PeerSink>,
    ) -> Result<(), RelayClosed> {
        self.send(RelayCommand::Connect { conn_id, sink }).await
    }

    pub async fn inbound(&self, conn_id: ConnectionId, text: String) -> Result<(), RelayClosed> {
        self.send(RelayCommand::Inbound { conn_id, text }).await
    }

    pub async fn disconnect(&self, conn_id: ConnectionId) -> Result<(), RelayClosed> {
        self.send(RelayCommand::Disconnect { conn_id }).await
    }

    pub async fn room(&self, room_id: RoomId) -> Result<Option<Room>, RelayClosed> {
        let (reply, rx) = oneshot::channel();
        self.send(RelayCommand::Inspect { room_id, reply }).await?;
        rx.await.map_err(|_| RelayClosed)
    }

    async fn send(&self, cmd: RelayCommand) -> Result<(), RelayClosed> {
        self.command_tx.send(cmd).await.map_err(|_| RelayClosed)
    }
}
