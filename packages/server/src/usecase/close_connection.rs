//! UseCase: コネクション終了
//!
//! トランスポート層で WebSocket が閉じたときに 1 回だけ呼ばれます。
//! offline への確定はここでは行いません。最後のコネクションだった場合に
//! 猶予カウントダウンを開始するだけで、roster broadcast の時点では
//! ユーザーはまだ online として報告されます。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

use super::presence::PresenceTracker;

pub struct CloseConnectionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    presence: PresenceTracker,
}

impl CloseConnectionUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, presence: PresenceTracker) -> Self {
        Self { registry, presence }
    }

    /// Take a closed connection out of the engine.
    pub async fn execute(&self, connection: ConnectionId) {
        let Some(identity) = self.registry.unregister(&connection).await else {
            tracing::warn!("Close for unknown connection '{}'", connection);
            return;
        };
        tracing::info!(
            "Closed connection '{}' for user '{}'",
            connection,
            identity.user_name()
        );

        self.presence.demote_if_disconnected(identity.user_name()).await;
        self.presence.broadcast_roster().await;
    }
}
