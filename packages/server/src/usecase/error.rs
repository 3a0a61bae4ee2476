//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, RoomId, ValueObjectError};

/// ルーム管理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomUseCaseError {
    /// 入力値が不正
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValueObjectError),

    /// ルームが存在しない
    #[error("Room '{0}' not found")]
    NotFound(RoomId),

    /// ルーム名が重複している
    #[error("Room name '{0}' is already taken")]
    NameTaken(String),

    /// 永続化層のエラー
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for RoomUseCaseError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(id) => Self::NotFound(id),
            RepositoryError::RoomNameTaken(name) => Self::NameTaken(name),
            other => Self::Repository(other),
        }
    }
}

/// メッセージ履歴のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageUseCaseError {
    /// 入力値が不正
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValueObjectError),

    /// 宛先ルームが存在しない
    #[error("Room '{0}' not found")]
    RoomNotFound(RoomId),

    /// 永続化層のエラー
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for MessageUseCaseError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(id) => Self::RoomNotFound(id),
            other => Self::Repository(other),
        }
    }
}
