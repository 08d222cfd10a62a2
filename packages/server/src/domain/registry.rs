//! Connection Registry trait 定義
//!
//! 接続中のコネクションと認証済み Identity の対応を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::DeliveryError;
use super::value_object::{ConnectionId, Identity, UserName};

/// Per-connection outbound channel. The transport side drains it and writes
/// each string as one text frame, preserving order.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Snapshot of one registered connection, safe to use after the registry
/// lock has been released.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    identity: Identity,
    sender: PusherChannel,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, identity: Identity, sender: PusherChannel) -> Self {
        Self {
            id,
            identity,
            sender,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Queue one wire frame for this connection.
    pub fn send(&self, content: &str) -> Result<(), DeliveryError> {
        self.sender
            .send(content.to_string())
            .map_err(|e| DeliveryError::SendFailed(e.to_string()))
    }
}

/// Registry of live connections, the fan-out target set.
///
/// All operations are atomic with respect to concurrent callers. Iteration
/// for delivery always goes through `snapshot`, so a connection closing
/// mid-broadcast cannot corrupt the iteration; delivery to such a
/// connection fails and is swallowed by the caller.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Associate a connection with its verified identity and push channel.
    async fn register(&self, connection: ConnectionId, identity: Identity, sender: PusherChannel);

    /// Remove a connection, returning the identity it was bound to.
    async fn unregister(&self, connection: &ConnectionId) -> Option<Identity>;

    /// Number of open connections bound to the given user. A user is only
    /// eligible for pending-offline once this reaches zero.
    async fn connection_count_for(&self, user: &UserName) -> usize;

    /// Deliver one frame to a single connection (history replay is private,
    /// not broadcast).
    async fn push_to(&self, connection: &ConnectionId, content: &str) -> Result<(), DeliveryError>;

    /// Copy-on-read snapshot of every registered connection.
    async fn snapshot(&self) -> Vec<ConnectionHandle>;
}
