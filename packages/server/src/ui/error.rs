//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::ValueObjectError,
    infrastructure::{dispatcher::DispatchError, dto::http::ErrorDto},
    usecase::{MessageUseCaseError, RoomUseCaseError},
};

/// Error returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (
            status,
            Json(ErrorDto {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(error: ValueObjectError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<RoomUseCaseError> for ApiError {
    fn from(error: RoomUseCaseError) -> Self {
        match error {
            RoomUseCaseError::InvalidInput(e) => e.into(),
            RoomUseCaseError::NotFound(_) => Self::NotFound("Room not found".to_string()),
            e @ RoomUseCaseError::NameTaken(_) => Self::Conflict(e.to_string()),
            RoomUseCaseError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<MessageUseCaseError> for ApiError {
    fn from(error: MessageUseCaseError) -> Self {
        match error {
            MessageUseCaseError::InvalidInput(e) => e.into(),
            MessageUseCaseError::RoomNotFound(_) => Self::NotFound("Room not found".to_string()),
            MessageUseCaseError::Repository(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        Self::ServiceUnavailable(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RepositoryError, RoomIdFactory};

    #[test]
    fn test_usecase_errors_map_to_status_codes() {
        // テスト項目: UseCase のエラー種別が適切な HTTP ステータスに変換される
        // given (前提条件):
        let room_id = RoomIdFactory::generate().unwrap();
        let cases = vec![
            (
                ApiError::from(RoomUseCaseError::InvalidInput(ValueObjectError::UsernameEmpty)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(RoomUseCaseError::NotFound(room_id.clone())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(RoomUseCaseError::NameTaken("general".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(MessageUseCaseError::RoomNotFound(room_id)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(MessageUseCaseError::Repository(RepositoryError::Backend(
                    "boom".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(DispatchError::Stopped),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        // then (期待する結果):
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
