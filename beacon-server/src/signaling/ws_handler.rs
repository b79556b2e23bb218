use crate::connection::WsPeerSink;
use crate::signaling::RelayHandle;
use axum::extract::State;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use beacon_core::ConnectionId;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(relay): State<RelayHandle>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

/// Root path: upgrades WebSocket requests, answers plain HTTP with a readiness line.
pub async fn index_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(relay): State<RelayHandle>,
) -> Response {
    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, relay))
            .into_response(),
        Err(_) => "SFU Server Ready".into_response(),
    }
}

async fn handle_socket(socket: WebSocket, relay: RelayHandle) {
    let conn_id = ConnectionId::new();
    info!("Client connected: {}", conn_id.short());

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    if let Err(e) = relay.connect(conn_id, Arc::new(WsPeerSink::new(tx))).await {
        error!("Dropping {}: {}", conn_id.short(), e);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay = relay.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        let text = text.as_str().to_owned();
                        if let Err(e) = relay.inbound(conn_id, text).await {
                            error!("{}", e);
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    let _ = relay.disconnect(conn_id).await;
    info!("Client disconnected: {}", conn_id.short());
}
