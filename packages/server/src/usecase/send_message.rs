//! UseCase: クライアントメッセージの処理
//!
//! 1 テキストフレームごとに呼ばれ、コマンド解釈、永続化、全接続への
//! ファンアウトを行います。broadcast は永続化成功の後にだけ始まるため、
//! 保存されていないメッセージが配信されることはありません。

use std::sync::Arc;

use idobata_shared::time::Clock;

use crate::domain::{
    ChatMessage, ClientCommand, ConnectionRegistry, Identity, MessageContent, MessageStore,
    Timestamp,
};
use crate::infrastructure::dto::conversion::message_envelope;

use super::error::SendError;

pub struct SendMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    store: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            clock,
        }
    }

    /// Interpret one raw client frame from `sender` and fan the resulting
    /// message out to every registered connection.
    ///
    /// Each recipient gets its own envelope: `isSender` reflects whether
    /// the recipient's user matches the message author, so two connections
    /// of the same user both see `isSender: true`. Delivery failures to
    /// individual connections are logged and do not affect the rest.
    pub async fn execute(&self, sender: &Identity, raw: &str) -> Result<(), SendError> {
        let command = ClientCommand::parse(raw).map_err(|_| SendError::MalformedCommand)?;

        let content = match command {
            ClientCommand::Message(text) => MessageContent::Text(text),
            ClientCommand::Image(reference) => MessageContent::Image(reference),
        };
        let now = Timestamp::new(self.clock.now_millis());
        let message = ChatMessage::new(sender.user_name().clone(), now, content);

        // Image frames carry a reference into external media storage, the
        // payload itself is not ours to keep.
        if matches!(message.content, MessageContent::Text(_)) {
            self.store
                .add_message(&message)
                .await
                .map_err(|e| SendError::PersistenceFailure(e.to_string()))?;
        }

        let connections = self.registry.snapshot().await;
        for connection in connections {
            let is_sender = connection.identity().user_name() == &message.author;
            let frame = message_envelope(&message, is_sender, now).to_wire();
            if let Err(e) = connection.send(&frame) {
                tracing::warn!(
                    "Failed to deliver message to connection '{}': {}",
                    connection.id(),
                    e
                );
            }
        }

        Ok(())
    }
}
