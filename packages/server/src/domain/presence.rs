//! プレゼンス状態のドメインモデル
//!
//! ユーザーごとのオンライン状態と、オフライン確定までの猶予カウンタを
//! 管理する純粋な状態機械です。ロックや I/O は上位層（UseCase 層の
//! `PresenceTracker`）が担います。
//!
//! 状態遷移: `Online → PendingOffline { remaining } → (削除 = Offline)`
//!
//! Offline のユーザーはマップに存在しません（エントリの削除が Offline への
//! 確定を意味します）。

use std::collections::BTreeMap;

use super::value_object::UserName;

/// Presence of a single user still visible to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    /// At least one open connection
    Online,
    /// Zero open connections, still reported online until the counter
    /// reaches zero. `remaining` is expressed in abstract time units.
    PendingOffline { remaining: u32 },
}

/// Authoritative in-memory presence map, one entry per user name.
///
/// The reaper single-flight flag lives here, inside the same structure as
/// the pending entries, so that starting the reaper and inspecting the
/// tracked set happen under one lock (see `PresenceTracker`).
#[derive(Debug, Default)]
pub struct Roster {
    entries: BTreeMap<UserName, PresenceState>,
    reaper_running: bool,
    reaper_starts: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user online, cancelling a pending-offline countdown if one
    /// exists. Returns `true` if a countdown was cancelled.
    pub fn set_online(&mut self, user: UserName) -> bool {
        let previous = self.entries.insert(user, PresenceState::Online);
        matches!(previous, Some(PresenceState::PendingOffline { .. }))
    }

    /// Start the offline countdown for a user. Only valid from `Online`;
    /// calling it while already pending or absent is a no-op (idempotent).
    /// Returns `true` only when a new countdown was started.
    pub fn set_pending_offline(&mut self, user: &UserName, grace: u32) -> bool {
        match self.entries.get_mut(user) {
            Some(state @ PresenceState::Online) => {
                *state = PresenceState::PendingOffline { remaining: grace };
                true
            }
            _ => false,
        }
    }

    /// Age every pending entry by `step` time units (floored at zero) and
    /// remove the ones whose counter reached zero.
    ///
    /// Returns the finalized user names in deterministic (sorted) order.
    pub fn tick(&mut self, step: u32) -> Vec<UserName> {
        let mut expired = Vec::new();
        for (user, state) in self.entries.iter_mut() {
            if let PresenceState::PendingOffline { remaining } = state {
                *remaining = remaining.saturating_sub(step);
                if *remaining == 0 {
                    expired.push(user.clone());
                }
            }
        }
        for user in &expired {
            self.entries.remove(user);
        }
        expired
    }

    /// Whether any pending-offline entry is still tracked.
    pub fn has_pending(&self) -> bool {
        self.entries
            .values()
            .any(|state| matches!(state, PresenceState::PendingOffline { .. }))
    }

    /// Sorted set of user names currently reported online.
    ///
    /// Pending-offline users are included: offline is deferred until their
    /// grace expires. Repeated snapshots with unchanged membership
    /// serialize identically.
    pub fn snapshot(&self) -> Vec<UserName> {
        self.entries.keys().cloned().collect()
    }

    pub fn state_of(&self, user: &UserName) -> Option<PresenceState> {
        self.entries.get(user).copied()
    }

    /// Claim the single reaper slot. Returns `false` if a reaper is already
    /// running; at most one caller can win between two `retire_reaper`
    /// calls.
    pub fn begin_reaping(&mut self) -> bool {
        if self.reaper_running {
            return false;
        }
        self.reaper_running = true;
        self.reaper_starts += 1;
        true
    }

    /// Release the reaper slot. Must only be called by the running reaper,
    /// under the same lock that protects the entries.
    pub fn retire_reaper(&mut self) {
        self.reaper_running = false;
    }

    pub fn is_reaping(&self) -> bool {
        self.reaper_running
    }

    /// How many times a reaper task has been started over the roster's
    /// lifetime.
    pub fn reaper_starts(&self) -> u64 {
        self.reaper_starts
    }
}
