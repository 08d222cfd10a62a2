//! 外部コラボレーターの trait 定義
//!
//! メッセージ永続化と外部セッション管理は本エンジンの対象外であり、
//! ここで定義するインターフェース越しに利用します。具体的な実装は
//! Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::entity::ChatMessage;
use super::error::RepositoryError;
use super::value_object::{Timestamp, UserName};

/// History / storage collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist one message.
    async fn add_message(&self, message: &ChatMessage) -> Result<(), RepositoryError>;

    /// The last `limit` messages created before `before`, ordered oldest
    /// to newest.
    async fn recent_messages_before(
        &self,
        limit: usize,
        before: Timestamp,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// Mirror a presence transition to storage. The engine owns presence;
    /// storage only reflects it.
    async fn toggle_user_status(&self, user: &UserName, active: bool)
    -> Result<(), RepositoryError>;
}

/// External auth/session collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionGate: Send + Sync {
    /// Invalidate the external session of a user whose offline transition
    /// was finalized.
    async fn invalidate(&self, user: &UserName);
}
