//! Events pushed from the relay to live connections.

use tokio::sync::mpsc;

use super::value_object::{Payload, RoomId};

/// An event delivered to one connection
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    /// Another connection emitted a message into a room this one joined
    MessageReceived { room_id: RoomId, payload: Payload },
}

/// Outbound channel of one connection.
///
/// Unbounded so that fan-out never waits on a slow socket.
pub type Outbox = mpsc::UnboundedSender<RelayEvent>;
