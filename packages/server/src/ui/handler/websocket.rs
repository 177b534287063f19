//! WebSocket relay connection handler.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, time::timeout};

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::decode_event,
    ui::state::AppState,
    usecase::{Flow, RelaySession, RoomRouter, RouterError},
};

/// How long a single socket write may take before the client counts as stuck
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Create a channel for this connection to receive relayed frames
    let (tx, rx) = mpsc::channel(state.send_queue_capacity);
    let connection_id = state.registry.register(tx).await;
    tracing::debug!(connection_id = %connection_id, "Upgrade accepted");

    let failed_registry = state.registry.clone();
    let failed_id = connection_id.clone();
    ws.on_failed_upgrade(move |e: axum::Error| {
        tracing::warn!(connection_id = %failed_id, "WebSocket upgrade failed: {}", e);
        tokio::spawn(async move {
            failed_registry.unregister(&failed_id).await;
        });
    })
    .on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    mut rx: mpsc::Receiver<String>,
) {
    if let Err(e) = state.registry.activate(&connection_id).await {
        tracing::warn!("Dropping connection after handshake: {}", e);
        return;
    }
    tracing::info!(connection_id = %connection_id, "Client connected");

    let (mut sender, mut receiver) = socket.split();

    // Forward queued frames to the socket. Ends when the registry drops the
    // connection's sender, the socket stops accepting writes, or a write stalls.
    let writer_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match timeout(WRITE_TIMEOUT, sender.send(Message::Text(frame.into()))).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => break,
                Err(_) => {
                    tracing::warn!(connection_id = %writer_id, "Socket write timed out");
                    return;
                }
            }
        }
        let _ = timeout(WRITE_TIMEOUT, sender.close()).await;
    });

    let router = RoomRouter::new(state.registry.clone());
    let mut session = RelaySession::new(connection_id.clone());

    // Receive one frame, react, loop.
    loop {
        tokio::select! {
            frame = receiver.next() => {
                let frame = match frame {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => {
                        tracing::error!(connection_id = %connection_id, "WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                };

                match frame {
                    Message::Text(text) => {
                        let event = match decode_event(text.as_str()) {
                            Ok(event) => event,
                            Err(e) => {
                                tracing::warn!(connection_id = %connection_id, "Ignoring frame: {}", e);
                                continue;
                            }
                        };
                        match router.dispatch(&mut session, event).await {
                            Ok(Flow::Continue) => {}
                            Ok(Flow::Stop) => break,
                            Err(RouterError::SessionClosed(_)) => {
                                tracing::info!(connection_id = %connection_id, "Session closed by registry");
                                break;
                            }
                            Err(e) => {
                                tracing::warn!(connection_id = %connection_id, "Event rejected: {}", e);
                            }
                        }
                    }
                    Message::Binary(_) => {
                        tracing::debug!(connection_id = %connection_id, "Ignoring binary frame");
                    }
                    Message::Ping(_) | Message::Pong(_) => {
                        // Ping/pong is handled automatically by the WebSocket protocol
                    }
                    Message::Close(_) => {
                        tracing::debug!(connection_id = %connection_id, "Client requested close");
                        break;
                    }
                }
            }
            _ = &mut send_task => {
                tracing::debug!(connection_id = %connection_id, "Outbound side closed");
                break;
            }
        }
    }

    router.close(&mut session).await;
    send_task.abort();
}
