//! UseCase: メッセージ履歴の保存と取得
//!
//! リアルタイム配信（RoomRelay）とは独立した書き込みです。
//! クライアントはリレーへの送信とは別に HTTP API 経由でこのユースケースを呼び出します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MessageUseCase::post() / list()
//!
//! ### どのような状況を想定しているか
//! - 正常系：保存した順に履歴が返る
//! - 異常系：存在しないルームへの保存、ストレージ障害
//! - エッジケース：存在しないルームの履歴取得（空のリスト）

use std::sync::Arc;

use crate::domain::{
    ChatRepository, Message, MessageIdFactory, MessageText, RoomId, Timestamp, Username,
};

use super::error::MessageUseCaseError;

/// メッセージ履歴のユースケース
pub struct MessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl MessageUseCase {
    /// 新しい MessageUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// メッセージを保存
    ///
    /// # Errors
    ///
    /// * `RoomNotFound` - 宛先ルームが存在しない
    pub async fn post(
        &self,
        room_id: RoomId,
        sender: Username,
        text: MessageText,
    ) -> Result<Message, MessageUseCaseError> {
        if self.repository.get_room(&room_id).await?.is_none() {
            return Err(MessageUseCaseError::RoomNotFound(room_id));
        }

        let message = Message::new(
            MessageIdFactory::generate(),
            room_id,
            sender,
            text,
            Timestamp::now(),
        );
        let message = self.repository.create_message(message).await?;
        tracing::debug!(
            message_id = %message.id,
            room_id = %message.room_id,
            sender = %message.sender,
            "Message stored"
        );
        Ok(message)
    }

    /// ルームのメッセージ履歴を取得（保存順）
    ///
    /// 存在しないルームの履歴は空として返します。
    pub async fn list(&self, room_id: &RoomId) -> Result<Vec<Message>, MessageUseCaseError> {
        Ok(self.repository.list_messages(room_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockChatRepository, RepositoryError, Room, RoomIdFactory},
        infrastructure::repository::InMemoryChatRepository,
    };

    fn user(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn text(value: &str) -> MessageText {
        MessageText::new(value.to_string()).unwrap()
    }

    async fn repository_with_room() -> (Arc<InMemoryChatRepository>, RoomId) {
        let repository = Arc::new(InMemoryChatRepository::new());
        let room = Room::new(
            RoomIdFactory::generate().unwrap(),
            "general".to_string(),
            "General chat".to_string(),
            user("alice"),
            false,
            Timestamp::new(0),
        )
        .unwrap();
        let room = repository.create_room(room).await.unwrap();
        (repository, room.id)
    }

    #[tokio::test]
    async fn test_post_and_list_messages() {
        // テスト項目: 保存したメッセージが保存順に取得できる
        // given (前提条件):
        let (repository, room_id) = repository_with_room().await;
        let usecase = MessageUseCase::new(repository);

        // when (操作):
        usecase
            .post(room_id.clone(), user("alice"), text("hello"))
            .await
            .unwrap();
        usecase
            .post(room_id.clone(), user("bob"), text("hi alice"))
            .await
            .unwrap();
        let messages = usecase.list(&room_id).await.unwrap();

        // then (期待する結果):
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, user("alice"));
        assert_eq!(messages[1].text, text("hi alice"));
    }

    #[tokio::test]
    async fn test_post_to_unknown_room_fails() {
        // テスト項目: 存在しないルームへの保存は RoomNotFound になる
        // given (前提条件):
        let usecase = MessageUseCase::new(Arc::new(InMemoryChatRepository::new()));
        let room_id = RoomIdFactory::generate().unwrap();

        // when (操作):
        let result = usecase.post(room_id.clone(), user("alice"), text("hi")).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), MessageUseCaseError::RoomNotFound(room_id));
    }

    #[tokio::test]
    async fn test_list_unknown_room_is_empty() {
        // テスト項目: 存在しないルームの履歴は空のリストになる
        // given (前提条件):
        let usecase = MessageUseCase::new(Arc::new(InMemoryChatRepository::new()));
        let room_id = RoomIdFactory::generate().unwrap();

        // when (操作):
        let result = usecase.list(&room_id).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_post_storage_failure_is_reported() {
        // テスト項目: 保存時のストレージ障害は Repository エラーとして伝播する
        // given (前提条件):
        let mut repository = MockChatRepository::new();
        repository.expect_get_room().returning(|room_id| {
            Ok(Some(
                Room::new(
                    room_id.clone(),
                    "general".to_string(),
                    "General chat".to_string(),
                    Username::new("alice".to_string()).unwrap(),
                    false,
                    Timestamp::new(0),
                )
                .unwrap(),
            ))
        });
        repository
            .expect_create_message()
            .returning(|_| Err(RepositoryError::Backend("disk full".to_string())));
        let usecase = MessageUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase
            .post(RoomIdFactory::generate().unwrap(), user("alice"), text("hi"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            MessageUseCaseError::Repository(RepositoryError::Backend("disk full".to_string()))
        );
    }
}
