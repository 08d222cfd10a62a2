//! UseCase: プレゼンス追跡とタイムアウトリーパー
//!
//! 切断されたユーザーを猶予期間の経過後にのみ offline へ確定させる、
//! 遅延オフライン状態機械の調停役です。
//!
//! ## リーパーの単一飛行保証
//!
//! リーパータスクの起動判定（`begin_reaping`）と pending エントリの追加は
//! 同じ roster ロックの中で行われます。リーパー自身も「エントリが空に
//! なったので退役する」判定を同じロックの中で行うため、「空チェックの
//! 直後にエントリが追加されてリーパー不在になる」「二重起動する」の
//! どちらの競合も起きません。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::domain::{
    ConnectionRegistry, MessageStore, RepositoryError, Roster, SessionGate, UserName,
};
use crate::infrastructure::dto::conversion::{clear_envelope, status_envelope};

/// Tuning of the delayed-offline state machine.
#[derive(Debug, Clone, Copy)]
pub struct PresenceConfig {
    /// Grace window after the last disconnect, in time units
    pub grace_units: u32,
    /// How many units each reaper tick ages the pending entries
    pub tick_units: u32,
    /// Wall-clock duration of one reaper tick
    pub tick_interval: Duration,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        // One time unit is one second: a tick every five seconds ages each
        // pending entry by five units, and offline is finalized 60 units
        // after the last close.
        Self {
            grace_units: 60,
            tick_units: 5,
            tick_interval: Duration::from_secs(5),
        }
    }
}

/// Owns the presence roster and the zero-or-one reaper task aging it.
///
/// Cheap to clone; clones share the same roster.
#[derive(Clone)]
pub struct PresenceTracker {
    roster: Arc<Mutex<Roster>>,
    registry: Arc<dyn ConnectionRegistry>,
    store: Arc<dyn MessageStore>,
    sessions: Arc<dyn SessionGate>,
    config: PresenceConfig,
}

impl PresenceTracker {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        store: Arc<dyn MessageStore>,
        sessions: Arc<dyn SessionGate>,
        config: PresenceConfig,
    ) -> Self {
        Self {
            roster: Arc::new(Mutex::new(Roster::new())),
            registry,
            store,
            sessions,
            config,
        }
    }

    /// Mark a user online, cancelling a pending-offline countdown if one is
    /// running, and mirror the transition to storage.
    pub async fn mark_online(&self, user: &UserName) -> Result<(), RepositoryError> {
        let cancelled = {
            let mut roster = self.roster.lock().await;
            roster.set_online(user.clone())
        };
        if cancelled {
            tracing::info!("User '{}' reconnected within grace period", user);
        }
        self.store.toggle_user_status(user, true).await
    }

    /// Start the offline countdown for a user, unless a connection for the
    /// same identity is still (or again) registered.
    ///
    /// The live-connection re-check happens under the roster lock, so a
    /// concurrent reopen either skips the countdown here or cancels it via
    /// `mark_online` immediately after; a connected user can never stay
    /// pending.
    pub async fn demote_if_disconnected(&self, user: &UserName) {
        let mut roster = self.roster.lock().await;
        if self.registry.connection_count_for(user).await > 0 {
            return;
        }
        if roster.set_pending_offline(user, self.config.grace_units) {
            tracing::info!(
                "User '{}' pending offline, grace {} units",
                user,
                self.config.grace_units
            );
            if roster.begin_reaping() {
                tokio::spawn(self.clone().reap_loop());
            }
        }
    }

    /// Sorted set of user names currently reported online (pending-offline
    /// users included, since offline is deferred).
    pub async fn snapshot(&self) -> Vec<UserName> {
        let roster = self.roster.lock().await;
        roster.snapshot()
    }

    /// Broadcast `clear` followed by one `status` per online user to every
    /// registered connection. Delivery failures to individual connections
    /// are logged and swallowed.
    pub async fn broadcast_roster(&self) {
        let users = {
            let roster = self.roster.lock().await;
            roster.snapshot()
        };

        let mut frames = Vec::with_capacity(users.len() + 1);
        frames.push(clear_envelope().to_wire());
        for user in &users {
            frames.push(status_envelope(user).to_wire());
        }

        // Snapshot first, deliver after the registry lock is released.
        let connections = self.registry.snapshot().await;
        for connection in connections {
            for frame in &frames {
                if let Err(e) = connection.send(frame) {
                    tracing::warn!(
                        "Failed to deliver roster frame to connection '{}': {}",
                        connection.id(),
                        e
                    );
                    break;
                }
            }
        }
    }

    /// How many reaper tasks have been started so far.
    pub async fn reaper_starts(&self) -> u64 {
        let roster = self.roster.lock().await;
        roster.reaper_starts()
    }

    pub async fn is_reaping(&self) -> bool {
        let roster = self.roster.lock().await;
        roster.is_reaping()
    }

    async fn reap_loop(self) {
        tracing::debug!("Presence reaper started");
        loop {
            tokio::time::sleep(self.config.tick_interval).await;

            let (expired, done) = {
                let mut roster = self.roster.lock().await;
                let expired = roster.tick(self.config.tick_units);
                let done = !roster.has_pending();
                if done {
                    roster.retire_reaper();
                }
                (expired, done)
            };

            for user in &expired {
                self.finalize(user).await;
            }

            if done {
                tracing::debug!("Presence reaper retired: no pending entries remain");
                break;
            }
        }
    }

    /// Complete an offline transition: mirror to storage, invalidate the
    /// external session and announce the new roster.
    async fn finalize(&self, user: &UserName) {
        tracing::info!("User '{}' is now offline", user);
        if let Err(e) = self.store.toggle_user_status(user, false).await {
            tracing::warn!("Failed to mirror offline status for '{}': {}", user, e);
        }
        self.sessions.invalidate(user).await;
        self.broadcast_roster().await;
    }
}
