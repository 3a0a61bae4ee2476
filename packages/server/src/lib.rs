//! Chat room relay server.
//!
//! Live connections join named rooms over WebSocket and every message
//! emitted into a room is pushed to the room's other subscribers. Rooms and
//! message history are managed separately through a JSON HTTP API.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::run as run_server;
