//! WebSocket を使った ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 接続中のコネクションと Identity・push チャンネルの対応を管理
//! - ファンアウト対象のスナップショット提供
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、配信に使用します。
//! ブロードキャストの反復は常に `snapshot` のコピーに対して行われるため、
//! 配信中にコネクションが閉じても反復は壊れません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionHandle, ConnectionId, ConnectionRegistry, DeliveryError, Identity, PusherChannel,
    UserName,
};

/// WebSocket-backed connection registry.
#[derive(Default)]
pub struct WebSocketConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ConnectionHandle>>,
}

impl WebSocketConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for WebSocketConnectionRegistry {
    async fn register(&self, connection: ConnectionId, identity: Identity, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(
            connection,
            ConnectionHandle::new(connection, identity.clone(), sender),
        );
        tracing::debug!(
            "Connection '{}' registered for user '{}'",
            connection,
            identity.user_name()
        );
    }

    async fn unregister(&self, connection: &ConnectionId) -> Option<Identity> {
        let mut connections = self.connections.lock().await;
        let handle = connections.remove(connection)?;
        tracing::debug!(
            "Connection '{}' unregistered for user '{}'",
            connection,
            handle.identity().user_name()
        );
        Some(handle.identity().clone())
    }

    async fn connection_count_for(&self, user: &UserName) -> usize {
        let connections = self.connections.lock().await;
        connections
            .values()
            .filter(|handle| handle.identity().user_name() == user)
            .count()
    }

    async fn push_to(&self, connection: &ConnectionId, content: &str) -> Result<(), DeliveryError> {
        let handle = {
            let connections = self.connections.lock().await;
            connections.get(connection).cloned()
        };

        match handle {
            Some(handle) => handle.send(content),
            None => Err(DeliveryError::ConnectionNotFound(connection.to_string())),
        }
    }

    async fn snapshot(&self) -> Vec<ConnectionHandle> {
        let connections = self.connections.lock().await;
        connections.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn identity(name: &str) -> Identity {
        Identity::new(
            UserName::new(name.to_string()).unwrap(),
            format!("{name}-nick"),
        )
    }

    #[tokio::test]
    async fn test_register_and_snapshot() {
        // テスト項目: 登録したコネクションがスナップショットに現れる
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let connection = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        registry.register(connection, identity("alice"), tx).await;

        // then (期待する結果):
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), connection);
        assert_eq!(snapshot[0].identity().user_name().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_unregister_returns_identity() {
        // テスト項目: unregister が紐付いていた Identity を返す
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let connection = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.register(connection, identity("alice"), tx).await;

        // when (操作):
        let result = registry.unregister(&connection).await;

        // then (期待する結果):
        assert_eq!(result, Some(identity("alice")));
        assert!(registry.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_unregister_unknown_connection_returns_none() {
        // テスト項目: 未登録コネクションの unregister は None を返す
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();

        // when (操作):
        let result = registry.unregister(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_connection_count_tracks_multiple_connections_per_user() {
        // テスト項目: 同一ユーザーの複数コネクションが正しくカウントされる
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        registry.register(first, identity("alice"), tx1).await;
        registry.register(second, identity("alice"), tx2).await;

        // when (操作):
        let count_before = registry
            .connection_count_for(&UserName::new("alice".to_string()).unwrap())
            .await;
        registry.unregister(&first).await;
        let count_after = registry
            .connection_count_for(&UserName::new("alice".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(count_before, 2);
        assert_eq!(count_after, 1);
    }

    #[tokio::test]
    async fn test_push_to_delivers_to_single_connection() {
        // テスト項目: push_to が対象コネクションのみに配信する
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let connection = ConnectionId::generate();
        let other = ConnectionId::generate();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.register(connection, identity("alice"), tx1).await;
        registry.register(other, identity("bob"), tx2).await;

        // when (操作):
        let result = registry.push_to(&connection, "private frame").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("private frame".to_string()));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection_fails() {
        // テスト項目: 未登録コネクションへの push_to はエラーを返す
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();

        // when (操作):
        let result = registry.push_to(&ConnectionId::generate(), "frame").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(DeliveryError::ConnectionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_send_to_dropped_receiver_fails_without_affecting_others() {
        // テスト項目: 受信側が閉じたコネクションへの配信失敗は個別に留まる
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let gone = ConnectionId::generate();
        let alive = ConnectionId::generate();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.register(gone, identity("alice"), tx1).await;
        registry.register(alive, identity("bob"), tx2).await;
        drop(rx1);

        // when (操作):
        let snapshot = registry.snapshot().await;
        let results: Vec<_> = snapshot
            .iter()
            .map(|handle| handle.send("broadcast frame"))
            .collect();

        // then (期待する結果): 片方は失敗、もう片方には届く
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
        assert_eq!(rx2.recv().await, Some("broadcast frame".to_string()));
    }
}
