//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! Vec / HashMap をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! 現在、ドメインモデル（`Room`, `Message`）を直接ストレージとして使用しています。
//! 永続ストアを実装する際は、DB Row → DTO → ドメインモデルの変換層が必要になります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatRepository, Message, RepositoryError, Room, RoomId, RoomUpdate,
};

#[derive(Debug, Default)]
struct Store {
    /// 作成順に並んだルーム
    rooms: Vec<Room>,
    /// ルームごとのメッセージ履歴（作成順）
    messages: HashMap<RoomId, Vec<Message>>,
}

impl Store {
    fn name_taken(&self, name: &str, except: Option<&RoomId>) -> bool {
        self.rooms
            .iter()
            .any(|r| r.name == name && Some(&r.id) != except)
    }

    fn room_mut(&mut self, room_id: &RoomId) -> Result<&mut Room, RepositoryError> {
        self.rooms
            .iter_mut()
            .find(|r| &r.id == room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.clone()))
    }
}

/// インメモリ Chat Repository 実装
///
/// ドメイン層の ChatRepository trait を実装します（依存性の逆転）。
#[derive(Debug, Default)]
pub struct InMemoryChatRepository {
    store: Mutex<Store>,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError> {
        let mut store = self.store.lock().await;
        if store.name_taken(&room.name, None) {
            return Err(RepositoryError::RoomNameTaken(room.name));
        }
        store.rooms.push(room.clone());
        Ok(room)
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.rooms.clone())
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.rooms.iter().find(|r| &r.id == room_id).cloned())
    }

    async fn update_room(
        &self,
        room_id: &RoomId,
        update: RoomUpdate,
    ) -> Result<Room, RepositoryError> {
        let mut store = self.store.lock().await;

        if let Some(name) = &update.name
            && store.name_taken(name, Some(room_id))
        {
            return Err(RepositoryError::RoomNameTaken(name.clone()));
        }

        let room = store.room_mut(room_id)?;
        if let Some(name) = update.name {
            room.rename(name)
                .map_err(|e| RepositoryError::Backend(e.to_string()))?;
        }
        if let Some(members) = update.members {
            room.set_members(members);
        }
        Ok(room.clone())
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        let mut store = self.store.lock().await;
        let before = store.rooms.len();
        store.rooms.retain(|r| &r.id != room_id);
        store.messages.remove(room_id);
        Ok(store.rooms.len() != before)
    }

    async fn create_message(&self, message: Message) -> Result<Message, RepositoryError> {
        let mut store = self.store.lock().await;
        if !store.rooms.iter().any(|r| r.id == message.room_id) {
            return Err(RepositoryError::RoomNotFound(message.room_id));
        }
        store
            .messages
            .entry(message.room_id.clone())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, room_id: &RoomId) -> Result<Vec<Message>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.messages.get(room_id).cloned().unwrap_or_default())
    }
}
