//! Real-time chat presence and broadcast engine.
//!
//! Tracks which users are connected, replays recent history to newly joined
//! connections, fans messages out to every connection, and demotes a user to
//! offline only after a grace period following their last disconnect.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
