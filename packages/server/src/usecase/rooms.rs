//! UseCase: ルーム管理（作成・取得・更新・削除）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RoomUseCase の各操作と Repository エラーの変換
//!
//! ### なぜこのテストが必要か
//! - HTTP API のステータスコードはこのエラー種別から決まるため
//!
//! ### どのような状況を想定しているか
//! - 正常系：作成と一覧
//! - 異常系：重複名、存在しないルーム、ストレージ障害（mockall で再現）

use std::sync::Arc;

use crate::domain::{
    ChatRepository, Room, RoomId, RoomIdFactory, RoomUpdate, Timestamp, Username,
};

use super::error::RoomUseCaseError;

/// ルーム作成の入力
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub description: String,
    pub owner: Username,
    pub is_private: bool,
    pub members: Vec<Username>,
}

/// ルーム管理のユースケース
pub struct RoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl RoomUseCase {
    /// 新しい RoomUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// ルームを作成
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - 名前・説明が空
    /// * `NameTaken` - 同名のルームが存在する
    pub async fn create(&self, input: NewRoom) -> Result<Room, RoomUseCaseError> {
        let mut room = Room::new(
            RoomIdFactory::generate()?,
            input.name,
            input.description,
            input.owner,
            input.is_private,
            Timestamp::now(),
        )?;
        room.set_members(input.members);

        let room = self.repository.create_room(room).await?;
        tracing::info!(room_id = %room.id, name = %room.name, "Room created");
        Ok(room)
    }

    /// ルーム一覧を取得
    pub async fn list(&self) -> Result<Vec<Room>, RoomUseCaseError> {
        Ok(self.repository.list_rooms().await?)
    }

    /// ルームを取得
    ///
    /// # Errors
    ///
    /// * `NotFound` - ルームが存在しない
    pub async fn get(&self, room_id: &RoomId) -> Result<Room, RoomUseCaseError> {
        self.repository
            .get_room(room_id)
            .await?
            .ok_or_else(|| RoomUseCaseError::NotFound(room_id.clone()))
    }

    /// ルームを部分更新
    ///
    /// 空の名前は「変更なし」として扱います。
    ///
    /// # Errors
    ///
    /// * `NotFound` / `NameTaken`
    pub async fn update(
        &self,
        room_id: &RoomId,
        mut update: RoomUpdate,
    ) -> Result<Room, RoomUseCaseError> {
        update.name = update.name.filter(|name| !name.trim().is_empty());
        let room = self.repository.update_room(room_id, update).await?;
        tracing::info!(room_id = %room.id, "Room updated");
        Ok(room)
    }

    /// ルームとそのメッセージ履歴を削除
    ///
    /// 存在しないルームの削除も成功として扱います（冪等）。
    /// ライブ接続の購読には影響しません（リレーは永続ルームと独立）。
    pub async fn delete(&self, room_id: &RoomId) -> Result<(), RoomUseCaseError> {
        if self.repository.delete_room(room_id).await? {
            tracing::info!(room_id = %room_id, "Room deleted");
        } else {
            tracing::debug!(room_id = %room_id, "Delete for unknown room ignored");
        }
        Ok(())
    }
}
