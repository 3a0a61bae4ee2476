//! Server state shared by the HTTP and WebSocket handlers.

use std::sync::Arc;

use crate::{domain::ChatRepository, infrastructure::dispatcher::RelayHandle};

/// Shared application state
///
/// Built once at startup and handed to every handler through axum's state.
/// The relay itself lives on the dispatcher task; handlers only hold a handle.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ChatRepository>,
    /// Queue into the relay dispatcher
    pub relay: RelayHandle,
}

impl AppState {
    pub fn new(repository: Arc<dyn ChatRepository>, relay: RelayHandle) -> Self {
        Self { repository, relay }
    }
}
