//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local, TimeZone};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in milliseconds
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        current_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in milliseconds
pub fn current_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Render a message creation time for display, relative to "now".
///
/// Messages created on the same local calendar day as `now_millis` render
/// time-only (`hh:mm AM/PM`); older messages are prefixed with the date
/// (`dd/mm/yy at hh:mm AM/PM`). Computed at encode time, never stored.
pub fn format_message_date(created_at_millis: i64, now_millis: i64) -> String {
    let created = to_local(created_at_millis);
    let now = to_local(now_millis);

    if created.date_naive() == now.date_naive() {
        created.format("%I:%M %p").to_string()
    } else {
        created.format("%d/%m/%y at %I:%M %p").to_string()
    }
}

fn to_local(millis: i64) -> DateTime<Local> {
    // Epoch millis name a single UTC instant, so the conversion is never
    // ambiguous.
    Local.timestamp_millis_opt(millis).unwrap()
}
