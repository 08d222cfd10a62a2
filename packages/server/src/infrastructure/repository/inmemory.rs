//! InMemory MessageStore 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。Vec を
//! インメモリ DB として使用します。耐久性の保証は本エンジンの対象外で、
//! DBMS を使う場合はこの trait の別実装を差し込みます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageStore, RepositoryError, Timestamp, UserName};

/// In-memory message store. Messages are kept in creation order.
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<ChatMessage>>,
    active_users: Mutex<HashMap<UserName, bool>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether storage currently mirrors the user as active.
    pub async fn is_active(&self, user: &UserName) -> bool {
        let active_users = self.active_users.lock().await;
        active_users.get(user).copied().unwrap_or(false)
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn add_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.push(message.clone());
        Ok(())
    }

    async fn recent_messages_before(
        &self,
        limit: usize,
        before: Timestamp,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let mut recent: Vec<ChatMessage> = messages
            .iter()
            .filter(|message| message.created_at <= before)
            .cloned()
            .collect();
        let start = recent.len().saturating_sub(limit);
        Ok(recent.split_off(start))
    }

    async fn toggle_user_status(
        &self,
        user: &UserName,
        active: bool,
    ) -> Result<(), RepositoryError> {
        let mut active_users = self.active_users.lock().await;
        active_users.insert(user.clone(), active);
        Ok(())
    }
}
