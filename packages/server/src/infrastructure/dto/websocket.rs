//! WebSocket message DTOs for the chat application.
//!
//! Every frame is a JSON text frame tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionId, Payload, RelayEvent, RoomId};

/// Events sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Subscribe to a room
    Join { room_id: String },
    /// Unsubscribe from a room
    Leave { room_id: String },
    /// Emit a payload into a room
    Message {
        room_id: String,
        payload: serde_json::Value,
    },
}

/// Events sent to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent once right after the socket opens
    Connected { connection_id: ConnectionId },
    /// A message relayed from another connection
    MessageReceived { room_id: RoomId, payload: Payload },
}

impl From<RelayEvent> for ServerEvent {
    fn from(event: RelayEvent) -> Self {
        match event {
            RelayEvent::MessageReceived { room_id, payload } => {
                ServerEvent::MessageReceived { room_id, payload }
            }
        }
    }
}
