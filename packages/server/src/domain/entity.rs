//! Core domain models for the chat application.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    error::ValueObjectError,
    value_object::{ConnectionId, MessageId, MessageText, RoomId, Timestamp, Username},
};

/// Lifecycle state of a live connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionState {
    /// Registered, not joined to any room
    Connected,
    /// Joined to at least one room
    Joined,
    /// Terminal. A disconnected connection is never revived
    Disconnected,
}

/// A live client connection tracked by the registry
#[derive(Debug, Clone)]
pub struct Connection {
    /// Process-assigned identifier
    pub id: ConnectionId,
    /// Rooms this connection currently receives messages for
    pub rooms: BTreeSet<RoomId>,
    /// Timestamp when the socket was opened
    pub connected_at: Timestamp,
}

impl Connection {
    /// Create a connection with no rooms
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            rooms: BTreeSet::new(),
            connected_at,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        if self.rooms.is_empty() {
            ConnectionState::Connected
        } else {
            ConnectionState::Joined
        }
    }
}

/// A persisted chat room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Unique display name
    pub name: String,
    pub description: String,
    /// User who created the room
    pub owner: Username,
    /// Persisted member list. Unrelated to live subscriptions
    pub members: Vec<Username>,
    /// Private rooms are only advertised to members by the client UI
    pub is_private: bool,
    /// Canonical URL of the room
    pub url: String,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new room with no members
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::RoomFieldEmpty` if the name or description is blank
    pub fn new(
        id: RoomId,
        name: String,
        description: String,
        owner: Username,
        is_private: bool,
        created_at: Timestamp,
    ) -> Result<Self, ValueObjectError> {
        let name = validate_field("name", name)?;
        let description = validate_field("description", description)?;
        let url = format!("/api/chitchat/room/{id}");
        Ok(Self {
            id,
            name,
            description,
            owner,
            members: Vec::new(),
            is_private,
            url,
            created_at,
        })
    }

    /// Change the display name
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::RoomFieldEmpty` if the new name is blank
    pub fn rename(&mut self, name: String) -> Result<(), ValueObjectError> {
        self.name = validate_field("name", name)?;
        Ok(())
    }

    /// Replace the member list, dropping duplicates but keeping first-seen order
    pub fn set_members(&mut self, members: Vec<Username>) {
        let mut seen = BTreeSet::new();
        self.members = members
            .into_iter()
            .filter(|m| seen.insert(m.as_str().to_string()))
            .collect();
    }
}

fn validate_field(field: &'static str, value: String) -> Result<String, ValueObjectError> {
    if value.trim().is_empty() {
        return Err(ValueObjectError::RoomFieldEmpty { field });
    }
    Ok(value)
}

/// A persisted chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Room the message belongs to
    pub room_id: RoomId,
    /// Sender's user name
    pub sender: Username,
    pub text: MessageText,
    /// Timestamp when the message was stored
    pub created_at: Timestamp,
}

impl Message {
    /// Create a new message
    pub fn new(
        id: MessageId,
        room_id: RoomId,
        sender: Username,
        text: MessageText,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            room_id,
            sender,
            text,
            created_at,
        }
    }
}
