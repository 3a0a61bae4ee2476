//! Infrastructure layer.
//!
//! Wire formats (DTOs), repository implementations and the relay dispatcher
//! that runs the room relay on its own task.

pub mod dispatcher;
pub mod dto;
pub mod repository;
