//! ドメイン層のエンティティ定義

use super::value_object::{Timestamp, UserName};

/// One chat message, created on receipt of a client command and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author's user name
    pub author: UserName,
    /// Creation time assigned by the engine
    pub created_at: Timestamp,
    /// Text or image payload (exactly one, by construction)
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn new(author: UserName, created_at: Timestamp, content: MessageContent) -> Self {
        Self {
            author,
            created_at,
            content,
        }
    }
}

/// Payload of a chat message.
///
/// Image content is an opaque reference into external media storage, not
/// binary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Image(String),
}
