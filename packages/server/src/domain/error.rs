//! ドメイン層のエラー定義

use thiserror::Error;

/// Failure reported by the storage collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Failure delivering a frame to a single connection. Never fatal for a
/// broadcast; callers log and continue with the remaining recipients.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("failed to push frame to connection: {0}")]
    SendFailed(String),
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
}
