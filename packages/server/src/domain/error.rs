//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConnectionId, RoomId};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// Free-form room field (name, description) validation error
    #[error("Room {field} cannot be empty")]
    RoomFieldEmpty { field: &'static str },
}

/// Errors raised by the connection registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection is not (or no longer) registered
    #[error("Connection '{0}' is not registered")]
    UnknownConnection(ConnectionId),

    /// A connection id was registered twice
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(ConnectionId),
}

/// Errors raised by the persistence gateway
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Room not found
    #[error("Room '{0}' not found")]
    RoomNotFound(RoomId),

    /// Another room already uses this name
    #[error("Room name '{0}' is already taken")]
    RoomNameTaken(String),

    /// Backend failure (connection lost, corrupted data, ...)
    #[error("Storage backend error: {0}")]
    Backend(String),
}
