//! UseCase: コネクション確立
//!
//! トランスポート層で WebSocket が開いたときに 1 回だけ呼ばれます。
//! 登録、online 遷移、履歴の private replay、roster broadcast の順で
//! 処理します。

use std::sync::Arc;

use idobata_shared::time::Clock;

use crate::domain::{ConnectionId, ConnectionRegistry, Identity, MessageStore, PusherChannel, Timestamp};
use crate::infrastructure::dto::conversion::message_envelope;

use super::error::OpenError;
use super::presence::PresenceTracker;

/// How many recent messages a fresh connection is caught up with.
pub const HISTORY_REPLAY_LIMIT: usize = 5;

pub struct OpenConnectionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    store: Arc<dyn MessageStore>,
    presence: PresenceTracker,
    clock: Arc<dyn Clock>,
}

impl OpenConnectionUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        store: Arc<dyn MessageStore>,
        presence: PresenceTracker,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            presence,
            clock,
        }
    }

    /// Bring a new connection into the engine.
    ///
    /// The history replay goes only to the opening connection; the roster
    /// broadcast afterwards goes to everyone. A delivery failure during
    /// replay is logged and skipped, a storage failure aborts the open.
    pub async fn execute(
        &self,
        connection: ConnectionId,
        identity: Identity,
        sender: PusherChannel,
    ) -> Result<(), OpenError> {
        tracing::info!(
            "Opening connection '{}' for user '{}'",
            connection,
            identity.user_name()
        );

        self.registry
            .register(connection, identity.clone(), sender)
            .await;
        self.presence.mark_online(identity.user_name()).await?;

        let now = Timestamp::new(self.clock.now_millis());
        let history = self
            .store
            .recent_messages_before(HISTORY_REPLAY_LIMIT, now)
            .await?;

        for message in &history {
            let is_sender = message.author == *identity.user_name();
            let frame = message_envelope(message, is_sender, now).to_wire();
            if let Err(e) = self.registry.push_to(&connection, &frame).await {
                tracing::warn!(
                    "Failed to replay history to connection '{}': {}",
                    connection,
                    e
                );
            }
        }

        self.presence.broadcast_roster().await;
        Ok(())
    }
}
