//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Payload, RoomId},
    infrastructure::{
        dispatcher::{DispatchError, RelayHandle},
        dto::websocket::{ClientEvent, ServerEvent},
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Channel the relay uses to push events to this connection
    let (tx, mut rx) = mpsc::unbounded_channel();

    let conn = match state.relay.connect(tx).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, "Rejecting WebSocket connection");
            return;
        }
    };
    tracing::info!(connection_id = %conn, "Connection established");

    let (mut sender, mut receiver) = socket.split();

    let hello = ServerEvent::Connected {
        connection_id: conn,
    };
    let sent = match serde_json::to_string(&hello) {
        Ok(frame) => sender.send(Message::Text(frame.into())).await.is_ok(),
        Err(e) => {
            tracing::error!(connection_id = %conn, error = %e, "Failed to encode hello");
            false
        }
    };
    if !sent {
        let _ = state.relay.disconnect(conn);
        return;
    }

    let relay = state.relay.clone();

    // Spawn a task to apply events sent by this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(connection_id = %conn, error = %e, "WebSocket error");
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if apply_client_event(&relay, conn, &text).is_err() {
                        tracing::warn!(connection_id = %conn, "Relay stopped, closing socket");
                        break;
                    }
                }
                Message::Close(_) => {
                    tracing::debug!(connection_id = %conn, "Client requested close");
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward relayed events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let frame = match serde_json::to_string(&ServerEvent::from(event)) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!(connection_id = %conn, error = %e, "Failed to encode event");
                    continue;
                }
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state.relay.disconnect(conn).is_err() {
        tracing::debug!(connection_id = %conn, "Relay already stopped at disconnect");
    }
    tracing::info!(connection_id = %conn, "Connection closed");
}

/// Decode one text frame and queue the matching relay command.
///
/// Malformed frames are logged and dropped. Only a stopped dispatcher is
/// reported as an error.
pub(crate) fn apply_client_event(
    relay: &RelayHandle,
    conn: ConnectionId,
    text: &str,
) -> Result<(), DispatchError> {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(connection_id = %conn, error = %e, "Dropping malformed event");
            return Ok(());
        }
    };

    match event {
        ClientEvent::Join { room_id } => match RoomId::new(room_id) {
            Ok(room_id) => relay.join(conn, room_id),
            Err(e) => {
                tracing::warn!(connection_id = %conn, error = %e, "Dropping join");
                Ok(())
            }
        },
        ClientEvent::Leave { room_id } => match RoomId::new(room_id) {
            Ok(room_id) => relay.leave(conn, room_id),
            Err(e) => {
                tracing::warn!(connection_id = %conn, error = %e, "Dropping leave");
                Ok(())
            }
        },
        ClientEvent::Message { room_id, payload } => match RoomId::new(room_id) {
            Ok(room_id) => relay.message(conn, room_id, Payload::new(payload)),
            Err(e) => {
                tracing::warn!(connection_id = %conn, error = %e, "Dropping message");
                Ok(())
            }
        },
    }
}
