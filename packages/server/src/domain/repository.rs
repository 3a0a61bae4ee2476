//! Repository trait (persistence gateway).
//!
//! The domain layer only defines the interface. Concrete storage lives in
//! `infrastructure::repository`, and use cases depend on this trait alone.
//! The relay never calls it.

use async_trait::async_trait;

use super::{
    entity::{Message, Room},
    error::RepositoryError,
    value_object::{RoomId, Username},
};

/// Fields of a room that may be changed after creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub members: Option<Vec<Username>>,
}

/// Durable store for rooms and messages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Store a new room.
    ///
    /// Fails with `RoomNameTaken` if another room already uses the name.
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError>;

    /// All rooms, oldest first
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError>;

    /// A single room, `None` if it does not exist
    async fn get_room(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError>;

    /// Apply a partial update and return the stored room
    async fn update_room(
        &self,
        room_id: &RoomId,
        update: RoomUpdate,
    ) -> Result<Room, RepositoryError>;

    /// Delete a room together with its messages
    ///
    /// Returns `false` when no such room existed.
    async fn delete_room(&self, room_id: &RoomId) -> Result<bool, RepositoryError>;

    /// Append a message to a room's history
    async fn create_message(&self, message: Message) -> Result<Message, RepositoryError>;

    /// A room's history in creation order
    async fn list_messages(&self, room_id: &RoomId) -> Result<Vec<Message>, RepositoryError>;
}
