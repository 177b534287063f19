//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Connection identifier value object.
///
/// Assigned by the registry when a relay connection is admitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a ConnectionId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room token value object.
///
/// An arbitrary client-supplied name; the only requirement is that it is not empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomToken(String);

impl RoomToken {
    /// Create a new RoomToken.
    ///
    /// # Arguments
    ///
    /// * `token` - The room name chosen by the client
    ///
    /// # Returns
    ///
    /// A Result containing the RoomToken or an error if the token is empty
    pub fn new(token: String) -> Result<Self, ValueObjectError> {
        if token.is_empty() {
            return Err(ValueObjectError::RoomTokenEmpty);
        }
        Ok(Self(token))
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

impl fmt::Display for RoomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name a client announces itself with when joining a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderLabel(String);

impl From<String> for SenderLabel {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SenderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Student document identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(String);

impl StudentId {
    /// Create a StudentId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
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
    fn test_room_token_new_success() {
        // テスト項目: 有効なルームトークンを作成できる
        // given (前提条件):
        let token = "lobby".to_string();

        // when (操作):
        let result = RoomToken::new(token);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "lobby");
    }

    #[test]
    fn test_room_token_new_empty_fails() {
        // テスト項目: 空のルームトークンは作成できない
        // given (前提条件):
        let token = "".to_string();

        // when (操作):
        let result = RoomToken::new(token);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomTokenEmpty);
    }

    #[test]
    fn test_room_token_accepts_arbitrary_text() {
        // テスト項目: 空白や記号を含むトークンもそのまま受け付ける
        let result = RoomToken::new(" room #1 / 教室 ".to_string());

        assert_eq!(result.unwrap().as_str(), " room #1 / 教室 ");
    }

    #[test]
    fn test_connection_id_displays_uuid() {
        // テスト項目: UUID から作成した ConnectionId は UUID 文字列として表示される
        // given (前提条件):
        let uuid = Uuid::new_v4();

        // when (操作):
        let id = ConnectionId::from_uuid(uuid);

        // then (期待する結果):
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(id.as_str(), uuid.to_string());
    }

    #[test]
    fn test_timestamp_serializes_as_number() {
        // テスト項目: Timestamp は JSON 上で数値として表現される
        let json = serde_json::to_string(&Timestamp::new(1_700_000_000)).unwrap();

        assert_eq!(json, "1700000000");
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
