//! Relay dispatcher.
//!
//! A single task owns the [`RoomRelay`] and applies [`RelayCommand`]s one at
//! a time, in the order they were queued. Every handler is synchronous and
//! runs to completion, so the registry needs no lock and a fan-out is never
//! interleaved with a join or disconnect.
//!
//! Transport handlers talk to the dispatcher through a cloneable
//! [`RelayHandle`].

use std::ops::ControlFlow;

use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{
    domain::{ConnectionId, Outbox, Payload, RoomId},
    usecase::{RelaySnapshot, RoomRelay},
};

/// Error returned when the dispatcher is no longer running
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Relay dispatcher has stopped")]
    Stopped,
}

/// A command processed by the [`RelayDispatcher`]
#[derive(Debug)]
pub enum RelayCommand {
    /// Register a new connection
    Connect {
        /// Channel for events pushed to this connection
        outbox: Outbox,
        /// Channel to send back the assigned connection id
        res_tx: oneshot::Sender<ConnectionId>,
    },

    /// Subscribe a connection to a room
    Join { conn: ConnectionId, room_id: RoomId },

    /// Unsubscribe a connection from a room
    Leave { conn: ConnectionId, room_id: RoomId },

    /// Fan a payload out to a room
    Message {
        conn: ConnectionId,
        room_id: RoomId,
        payload: Payload,
    },

    /// Terminal disconnect of a connection
    Disconnect { conn: ConnectionId },

    /// Read the current relay state
    Snapshot {
        res_tx: oneshot::Sender<RelaySnapshot>,
    },

    /// Stop the dispatcher
    Shutdown,
}

impl RelayCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect",
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::Message { .. } => "message",
            Self::Disconnect { .. } => "disconnect",
            Self::Snapshot { .. } => "snapshot",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Owner of the relay state and its command queue
pub struct RelayDispatcher {
    relay: RoomRelay,
    cmd_rx: mpsc::UnboundedReceiver<RelayCommand>,
}

impl RelayDispatcher {
    /// Create a dispatcher around `relay` and a handle to feed it
    pub fn new(relay: RoomRelay) -> (Self, RelayHandle) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        (Self { relay, cmd_rx }, RelayHandle { cmd_tx })
    }

    /// Process commands until shutdown or until every handle is dropped
    ///
    /// Returns the relay so callers can inspect the final state.
    pub async fn run(mut self) -> RoomRelay {
        tracing::debug!("Relay dispatcher started");

        while let Some(cmd) = self.cmd_rx.recv().await {
            tracing::trace!(command = cmd.name(), "Processing relay command");
            if self.process_command(cmd).is_break() {
                break;
            }
        }

        tracing::debug!(
            connections = self.relay.registry().connection_count(),
            "Relay dispatcher stopped"
        );
        self.relay
    }

    fn process_command(&mut self, cmd: RelayCommand) -> ControlFlow<()> {
        match cmd {
            RelayCommand::Connect { outbox, res_tx } => {
                let conn = self.relay.connect(outbox);
                if res_tx.send(conn).is_err() {
                    // the socket went away before learning its id
                    self.relay.disconnect(conn);
                }
            }

            RelayCommand::Join { conn, room_id } => {
                if let Err(e) = self.relay.join(conn, room_id) {
                    tracing::warn!(connection_id = %conn, error = %e, "Join ignored");
                }
            }

            RelayCommand::Leave { conn, room_id } => {
                if let Err(e) = self.relay.leave(conn, &room_id) {
                    tracing::warn!(connection_id = %conn, error = %e, "Leave ignored");
                }
            }

            RelayCommand::Message {
                conn,
                room_id,
                payload,
            } => {
                self.relay.relay(conn, &room_id, payload);
            }

            RelayCommand::Disconnect { conn } => {
                self.relay.disconnect(conn);
            }

            RelayCommand::Snapshot { res_tx } => {
                let _ = res_tx.send(self.relay.snapshot());
            }

            RelayCommand::Shutdown => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }
}

/// Spawn a dispatcher on the current runtime
pub fn spawn_dispatcher(relay: RoomRelay) -> (RelayHandle, JoinHandle<RoomRelay>) {
    let (dispatcher, handle) = RelayDispatcher::new(relay);
    (handle, tokio::spawn(dispatcher.run()))
}

/// Handle for queuing commands to the dispatcher
///
/// Commands sent through one handle are applied in the order they were sent.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    cmd_tx: mpsc::UnboundedSender<RelayCommand>,
}

impl RelayHandle {
    /// Register a connection and wait for its id
    pub async fn connect(&self, outbox: Outbox) -> Result<ConnectionId, DispatchError> {
        let (res_tx, res_rx) = oneshot::channel();
        self.send(RelayCommand::Connect { outbox, res_tx })?;
        res_rx.await.map_err(|_| DispatchError::Stopped)
    }

    pub fn join(&self, conn: ConnectionId, room_id: RoomId) -> Result<(), DispatchError> {
        self.send(RelayCommand::Join { conn, room_id })
    }

    pub fn leave(&self, conn: ConnectionId, room_id: RoomId) -> Result<(), DispatchError> {
        self.send(RelayCommand::Leave { conn, room_id })
    }

    /// Queue a fan-out; does not wait for delivery
    pub fn message(
        &self,
        conn: ConnectionId,
        room_id: RoomId,
        payload: Payload,
    ) -> Result<(), DispatchError> {
        self.send(RelayCommand::Message {
            conn,
            room_id,
            payload,
        })
    }

    pub fn disconnect(&self, conn: ConnectionId) -> Result<(), DispatchError> {
        self.send(RelayCommand::Disconnect { conn })
    }

    /// Current relay state, taken after every previously queued command
    pub async fn snapshot(&self) -> Result<RelaySnapshot, DispatchError> {
        let (res_tx, res_rx) = oneshot::channel();
        self.send(RelayCommand::Snapshot { res_tx })?;
        res_rx.await.map_err(|_| DispatchError::Stopped)
    }

    /// Ask the dispatcher to stop after the commands already queued
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(RelayCommand::Shutdown);
    }

    fn send(&self, cmd: RelayCommand) -> Result<(), DispatchError> {
        self.cmd_tx.send(cmd).map_err(|_| DispatchError::Stopped)
    }
}
