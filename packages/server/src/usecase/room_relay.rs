//! UseCase: ルームリレー（リアルタイム配信）
//!
//! 接続ごとの送信チャンネル（Outbox）と ConnectionRegistry を所有し、
//! 接続・参加・退出・切断・メッセージ配信を同期的に処理します。
//! ディスパッチャのタスクからのみ呼び出されるため、ロックは不要です。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RoomRelay::relay() の配信先選定（送信者を除くルーム購読者のみ）
//! - connect / join / leave / disconnect のライフサイクル
//!
//! ### なぜこのテストが必要か
//! - 配信の正しさ（届くべき接続に 1 回だけ届き、送信者には届かない）を保証する
//! - 切断後に購読者が残らない（リークしない）ことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数接続への配信、複数ルームの分離
//! - 異常系：受信側がすでに閉じている接続への配信
//! - エッジケース：誰も参加していないルーム、二重切断、未参加での切断

use std::collections::{BTreeSet, HashMap};

use crate::domain::{
    ConnectionId, ConnectionIdFactory, ConnectionRegistry, Outbox, Payload, RegistryError,
    RelayEvent, RoomId, Timestamp,
};

/// Outcome of one fan-out
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelayReport {
    /// Subscribers the event was handed to
    pub delivered: usize,
    /// Subscribers whose outbox was already closed
    pub failed: usize,
}

/// Point-in-time view of the relay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySnapshot {
    pub connections: usize,
    /// Subscriber count per room, sorted by room id
    pub rooms: Vec<(RoomId, usize)>,
}

/// Room relay: connection lifecycle plus room-scoped fan-out
#[derive(Debug, Default)]
pub struct RoomRelay {
    registry: ConnectionRegistry,
    outboxes: HashMap<ConnectionId, Outbox>,
}

impl RoomRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and its outbound channel
    pub fn connect(&mut self, outbox: Outbox) -> ConnectionId {
        loop {
            let candidate = ConnectionIdFactory::generate();
            match self.registry.connect(candidate, Timestamp::now()) {
                Ok(id) => {
                    self.outboxes.insert(id, outbox);
                    tracing::info!(
                        connection_id = %id,
                        connections = self.registry.connection_count(),
                        "Client connected"
                    );
                    return id;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Connection id collision, generating another");
                }
            }
        }
    }

    /// Subscribe a connection to a room
    ///
    /// No authorization is performed and the room does not need to exist in
    /// the persistent store.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownConnection` if the connection is gone
    pub fn join(&mut self, id: ConnectionId, room_id: RoomId) -> Result<(), RegistryError> {
        let added = self.registry.join(id, &room_id)?;
        if added {
            tracing::info!(connection_id = %id, room_id = %room_id, "Joined room");
        } else {
            tracing::debug!(connection_id = %id, room_id = %room_id, "Already in room");
        }
        Ok(())
    }

    /// Unsubscribe a connection from a room
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownConnection` if the connection is gone
    pub fn leave(&mut self, id: ConnectionId, room_id: &RoomId) -> Result<(), RegistryError> {
        if self.registry.leave(id, room_id)? {
            tracing::info!(connection_id = %id, room_id = %room_id, "Left room");
        }
        Ok(())
    }

    /// Deliver a payload to every subscriber of `room_id` except `sender`
    ///
    /// Delivery failures are logged per subscriber and never stop the
    /// remaining deliveries.
    pub fn relay(&self, sender: ConnectionId, room_id: &RoomId, payload: Payload) -> RelayReport {
        let mut report = RelayReport::default();

        for target in self.registry.iter_subscribers(room_id) {
            if target == sender {
                continue;
            }

            let event = RelayEvent::MessageReceived {
                room_id: room_id.clone(),
                payload: payload.clone(),
            };
            let sent = self
                .outboxes
                .get(&target)
                .is_some_and(|outbox| outbox.send(event).is_ok());

            if sent {
                report.delivered += 1;
            } else {
                report.failed += 1;
                tracing::warn!(
                    connection_id = %target,
                    room_id = %room_id,
                    "Failed to deliver message, subscriber outbox is closed"
                );
            }
        }

        tracing::debug!(
            sender = %sender,
            room_id = %room_id,
            delivered = report.delivered,
            failed = report.failed,
            "Relayed message"
        );

        report
    }

    /// Tear down a connection
    ///
    /// Removes it from every room and drops its outbox. Returns the rooms it
    /// had joined. Safe to call more than once.
    pub fn disconnect(&mut self, id: ConnectionId) -> BTreeSet<RoomId> {
        let rooms = self.registry.leave_all(id);
        if self.outboxes.remove(&id).is_some() {
            tracing::info!(
                connection_id = %id,
                rooms_left = rooms.len(),
                connections = self.registry.connection_count(),
                "Client disconnected"
            );
        } else {
            tracing::debug!(connection_id = %id, "Disconnect for unknown connection ignored");
        }
        rooms
    }

    /// Connections currently subscribed to a room
    pub fn subscribers_of(&self, room_id: &RoomId) -> BTreeSet<ConnectionId> {
        self.registry.subscribers_of(room_id)
    }

    /// Read-only access to the registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> RelaySnapshot {
        RelaySnapshot {
            connections: self.registry.connection_count(),
            rooms: self.registry.room_sizes(),
        }
    }
}
