//! SessionGate の実装
//!
//! 認証・セッション管理は外部コラボレーターの責務です。ここでは確定した
//! オフライン遷移を通知するだけのロギング実装を提供します。

use async_trait::async_trait;

use crate::domain::{SessionGate, UserName};

/// Session gate that only records invalidations in the log. Deployments
/// with a real session backend substitute their own `SessionGate`.
#[derive(Debug, Default)]
pub struct LoggingSessionGate;

impl LoggingSessionGate {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionGate for LoggingSessionGate {
    async fn invalidate(&self, user: &UserName) {
        tracing::info!("Session invalidated for user '{}'", user);
    }
}
