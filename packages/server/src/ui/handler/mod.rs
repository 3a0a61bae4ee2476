//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{
    create_message, create_room, debug_relay_state, delete_room, get_messages, get_room_detail,
    get_rooms, health_check, update_room,
};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
