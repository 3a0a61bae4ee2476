//! HTTP API request/response DTOs for the chat application.

use chitchat_shared::time::timestamp_to_rfc3339;
use serde::{Deserialize, Serialize};

use crate::domain::{Message, Room};

/// Body of `POST /api/chitchat/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub description: String,
    pub owner: String,
    /// Marks the room private when present and non-empty. Never stored.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl CreateRoomRequest {
    pub fn is_private(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Body of `PUT /api/chitchat/rooms/{room_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub members: Option<Vec<String>>,
}

/// Body of `POST /api/chitchat/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub text: String,
    pub sender: String,
    /// Target room id
    pub room: String,
}

/// Query of `GET /api/chitchat/messages`
#[derive(Debug, Clone, Deserialize)]
pub struct ListMessagesQuery {
    pub room: String,
}

/// Room representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub members: Vec<String>,
    pub is_private: bool,
    pub url: String,
    pub created_at: String, // ISO 8601
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.into_string(),
            name: room.name,
            description: room.description,
            owner: room.owner.into(),
            members: room.members.into_iter().map(Into::into).collect(),
            is_private: room.is_private,
            url: room.url,
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

/// Message representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub room: String,
    pub sender: String,
    pub text: String,
    pub created_at: String, // ISO 8601
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            room: message.room_id.into_string(),
            sender: message.sender.into(),
            text: message.text.into(),
            created_at: timestamp_to_rfc3339(message.created_at.value()),
        }
    }
}

/// Live relay statistics for the debug endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySnapshotDto {
    pub connections: usize,
    pub rooms: Vec<RoomSubscribersDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSubscribersDto {
    pub room_id: String,
    pub subscribers: usize,
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub message: String,
}
