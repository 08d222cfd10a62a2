//! UseCase 層のエラー定義
//!
//! どのエラーもプロセス致命ではありません。`MalformedCommand` は該当
//! メッセージ 1 件の破棄、`PersistenceFailure` は引き金になった操作のみの
//! 中断に留まります。

use thiserror::Error;

use crate::domain::RepositoryError;

/// Failure while opening a connection. Surfaces to the transport layer,
/// which closes the connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpenError {
    #[error("persistence failure while opening connection: {0}")]
    PersistenceFailure(String),
}

impl From<RepositoryError> for OpenError {
    fn from(e: RepositoryError) -> Self {
        Self::PersistenceFailure(e.to_string())
    }
}

/// Failure while handling one client message. The connection stays open
/// either way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// Unparseable client text; the single message is dropped
    #[error("malformed client command")]
    MalformedCommand,
    /// Storage collaborator error; no partial broadcast happens
    #[error("failed to persist message: {0}")]
    PersistenceFailure(String),
}
