//! ドメイン層の値オブジェクト定義
//!
//! 不正な値がドメインに入り込まないよう、生成時に検証を行います。

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Unique account name of a user, as verified by the external auth gate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserName(String);

/// Raised when a user name fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("user name must not be empty")]
pub struct InvalidUserName;

impl UserName {
    /// 新しい UserName を作成（空文字列は拒否）
    pub fn new(value: String) -> Result<Self, InvalidUserName> {
        if value.trim().is_empty() {
            return Err(InvalidUserName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = InvalidUserName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verified identity handed to the engine at connection-open time.
///
/// Immutable for the life of the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_name: UserName,
    nick_name: String,
}

impl Identity {
    pub fn new(user_name: UserName, nick_name: String) -> Self {
        Self {
            user_name,
            nick_name,
        }
    }

    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    pub fn nick_name(&self) -> &str {
        &self.nick_name
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Opaque handle for one transport-level connection.
///
/// Created on transport open, destroyed on transport close; never outlives
/// its transport session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_accepts_non_empty_value() {
        // テスト項目: 空でない文字列から UserName を作成できる
        // given (前提条件):
        let value = "alice".to_string();

        // when (操作):
        let result = UserName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_user_name_rejects_empty_value() {
        // テスト項目: 空文字列からの UserName 作成は拒否される
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = UserName::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(InvalidUserName));
    }

    #[test]
    fn test_user_name_rejects_whitespace_only_value() {
        // テスト項目: 空白のみの文字列からの UserName 作成は拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = UserName::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(InvalidUserName));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は一意である
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
