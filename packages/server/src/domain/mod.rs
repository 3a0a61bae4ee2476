//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, ConnectionState, Message, Room};
pub use error::{RegistryError, RepositoryError, ValueObjectError};
pub use event::{Outbox, RelayEvent};
pub use factory::{ConnectionIdFactory, MessageIdFactory, RoomIdFactory};
pub use registry::ConnectionRegistry;
pub use repository::{ChatRepository, RoomUpdate};
pub use value_object::{
    ConnectionId, MessageId, MessageText, Payload, RoomId, Timestamp, Username,
};

#[cfg(test)]
pub use repository::MockChatRepository;
