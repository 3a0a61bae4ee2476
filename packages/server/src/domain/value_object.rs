//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of identifiers and user names (bytes)
pub const MAX_IDENTIFIER_LEN: usize = 100;

/// Maximum length of a persisted message text (bytes)
pub const MAX_MESSAGE_TEXT_LEN: usize = 10000;

/// Connection identifier value object.
///
/// Assigned by the process when a socket opens and never persisted.
/// A reconnecting client always receives a fresh identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
///
/// Keys both the live subscriber index and persisted rooms. Any non-empty
/// string up to [`MAX_IDENTIFIER_LEN`] bytes is accepted, so clients may join
/// rooms that were never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Arguments
    ///
    /// * `id` - The room identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.len();
        if len > MAX_IDENTIFIER_LEN {
            return Err(ValueObjectError::RoomIdTooLong {
                max: MAX_IDENTIFIER_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Create a RoomId from a UUID (used for persisted rooms).
    pub fn from_uuid(uuid: Uuid) -> Result<Self, ValueObjectError> {
        Self::new(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(value: RoomId) -> Self {
        value.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User name value object.
///
/// Used for room owners, room members and message senders. Credentials are
/// handled outside this service, so a user name is just a validated label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.len();
        if len > MAX_IDENTIFIER_LEN {
            return Err(ValueObjectError::UsernameTooLong {
                max: MAX_IDENTIFIER_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted message text value object.
///
/// Only the HTTP persistence path validates text. Live relay payloads are
/// never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageText(String);

impl MessageText {
    /// Create a new MessageText.
    ///
    /// # Arguments
    ///
    /// * `text` - The message text
    ///
    /// # Returns
    ///
    /// A Result containing the MessageText or an error if validation fails
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.len();
        if len > MAX_MESSAGE_TEXT_LEN {
            return Err(ValueObjectError::MessageTextTooLong {
                max: MAX_MESSAGE_TEXT_LEN,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageText> for String {
    fn from(value: MessageText) -> Self {
        value.0
    }
}

/// Opaque relay payload.
///
/// Whatever JSON the sender attached to a message event. Cloning shares the
/// underlying value, so fan-out to many subscribers does not copy it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Arc<serde_json::Value>);

impl Payload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the JSON value.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current time.
    pub fn now() -> Self {
        Self(chitchat_shared::time::now_millis())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_new_success() {
        // テスト項目: 有効なルーム ID を作成できる
        // given (前提条件):
        let id = "lobby".to_string();

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "lobby");
    }

    #[test]
    fn test_room_id_new_empty_fails() {
        // テスト項目: 空 (空白のみを含む) のルーム ID は作成できない
        // when (操作):
        let empty = RoomId::new("".to_string());
        let blank = RoomId::new("   ".to_string());

        // then (期待する結果):
        assert_eq!(empty.unwrap_err(), ValueObjectError::RoomIdEmpty);
        assert_eq!(blank.unwrap_err(), ValueObjectError::RoomIdEmpty);
    }

    #[test]
    fn test_room_id_new_too_long_fails() {
        // テスト項目: 101 バイト以上のルーム ID は作成できない
        // given (前提条件):
        let id = "r".repeat(101);

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::RoomIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_room_id_deserialize_validates() {
        // テスト項目: デシリアライズ時にもルーム ID が検証される
        // when (操作):
        let ok: Result<RoomId, _> = serde_json::from_str("\"room1\"");
        let err: Result<RoomId, _> = serde_json::from_str("\"\"");

        // then (期待する結果):
        assert_eq!(ok.unwrap().as_str(), "room1");
        assert!(err.is_err());
    }

    #[test]
    fn test_username_new_empty_fails() {
        // テスト項目: 空のユーザー名は作成できない
        // when (操作):
        let result = Username::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_message_text_new_too_long_fails() {
        // テスト項目: 10001 バイト以上のメッセージ本文は作成できない
        // given (前提条件):
        let text = "a".repeat(10001);

        // when (操作):
        let result = MessageText::new(text);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageTextTooLong {
                max: 10000,
                actual: 10001
            }
        );
    }

    #[test]
    fn test_payload_is_transparent_json() {
        // テスト項目: Payload は中身の JSON をそのままシリアライズする
        // given (前提条件):
        let payload = Payload::new(serde_json::json!({"text": "hi", "author": "bob"}));

        // when (操作):
        let json = serde_json::to_value(&payload).unwrap();

        // then (期待する結果):
        assert_eq!(json, serde_json::json!({"text": "hi", "author": "bob"}));
    }

    #[test]
    fn test_payload_clone_shares_value() {
        // テスト項目: Payload のクローンは同じ JSON 値を共有する
        // given (前提条件):
        let payload = Payload::new(serde_json::json!({"text": "hi"}));

        // when (操作):
        let cloned = payload.clone();

        // then (期待する結果):
        assert!(std::ptr::eq(payload.as_value(), cloned.as_value()));
    }

    #[test]
    fn test_connection_id_equality() {
        // テスト項目: 同じ UUID を持つ ConnectionId は等価
        // given (前提条件):
        let uuid = Uuid::new_v4();

        // then (期待する結果):
        assert_eq!(ConnectionId::from_uuid(uuid), ConnectionId::from_uuid(uuid));
        assert_ne!(
            ConnectionId::from_uuid(uuid),
            ConnectionId::from_uuid(Uuid::new_v4())
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }
}
