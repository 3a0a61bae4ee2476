//! Connection registry.
//!
//! Tracks every live connection together with the rooms it has joined, plus
//! the reverse index from room to subscribers so that fan-out only touches
//! the connections of one room.
//!
//! The registry is a plain owned value with no interior locking. It is only
//! ever touched from the relay dispatcher task.

use std::collections::{BTreeSet, HashMap};

use super::{
    entity::{Connection, ConnectionState},
    error::RegistryError,
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// In-memory registry of live connections and room subscriptions
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
    subscribers: HashMap<RoomId, BTreeSet<ConnectionId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection with an empty room set
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateConnection` if the id is already registered
    pub fn connect(
        &mut self,
        id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<ConnectionId, RegistryError> {
        if self.connections.contains_key(&id) {
            return Err(RegistryError::DuplicateConnection(id));
        }
        self.connections.insert(id, Connection::new(id, connected_at));
        tracing::debug!(connection_id = %id, "Connection registered");
        Ok(id)
    }

    /// Subscribe a connection to a room
    ///
    /// Idempotent. Unknown rooms are created on the fly. Returns `true` if the
    /// membership is new.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownConnection` if the connection is not registered
    pub fn join(&mut self, id: ConnectionId, room_id: &RoomId) -> Result<bool, RegistryError> {
        let connection = self
            .connections
            .get_mut(&id)
            .ok_or(RegistryError::UnknownConnection(id))?;

        let added = connection.rooms.insert(room_id.clone());
        self.subscribers
            .entry(room_id.clone())
            .or_default()
            .insert(id);

        Ok(added)
    }

    /// Unsubscribe a connection from one room
    ///
    /// Idempotent. Returns `true` if a membership was removed.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownConnection` if the connection is not registered
    pub fn leave(&mut self, id: ConnectionId, room_id: &RoomId) -> Result<bool, RegistryError> {
        let connection = self
            .connections
            .get_mut(&id)
            .ok_or(RegistryError::UnknownConnection(id))?;

        let removed = connection.rooms.remove(room_id);
        self.remove_subscriber(room_id, id);

        Ok(removed)
    }

    /// Remove a connection from every room and forget it
    ///
    /// Returns the rooms the connection was subscribed to. Calling this for an
    /// unknown or already removed connection is a no-op returning no rooms.
    pub fn leave_all(&mut self, id: ConnectionId) -> BTreeSet<RoomId> {
        let Some(connection) = self.connections.remove(&id) else {
            return BTreeSet::new();
        };

        for room_id in &connection.rooms {
            self.remove_subscriber(room_id, id);
        }

        connection.rooms
    }

    /// Connections currently subscribed to a room
    ///
    /// Empty for rooms nobody joined.
    pub fn subscribers_of(&self, room_id: &RoomId) -> BTreeSet<ConnectionId> {
        self.subscribers.get(room_id).cloned().unwrap_or_default()
    }

    /// Iterate over the subscribers of a room without cloning the set
    pub fn iter_subscribers<'a>(
        &'a self,
        room_id: &RoomId,
    ) -> impl Iterator<Item = ConnectionId> + use<'a> {
        self.subscribers
            .get(room_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Rooms a connection has joined (empty for unknown connections)
    pub fn rooms_of(&self, id: ConnectionId) -> BTreeSet<RoomId> {
        self.connections
            .get(&id)
            .map(|c| c.rooms.clone())
            .unwrap_or_default()
    }

    /// Lifecycle state of a connection
    pub fn state_of(&self, id: ConnectionId) -> ConnectionState {
        self.connections
            .get(&id)
            .map_or(ConnectionState::Disconnected, Connection::state)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of rooms with at least one subscriber
    pub fn room_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Subscriber count per room, sorted by room id
    pub fn room_sizes(&self) -> Vec<(RoomId, usize)> {
        let mut sizes: Vec<_> = self
            .subscribers
            .iter()
            .map(|(room_id, set)| (room_id.clone(), set.len()))
            .collect();
        sizes.sort_by(|a, b| a.0.cmp(&b.0));
        sizes
    }

    fn remove_subscriber(&mut self, room_id: &RoomId, id: ConnectionId) {
        if let Some(set) = self.subscribers.get_mut(room_id) {
            set.remove(&id);
            if set.is_empty() {
                self.subscribers.remove(room_id);
            }
        }
    }
}
