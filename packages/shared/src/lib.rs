//! Shared utilities for the idobata chat presence engine.
//!
//! Cross-cutting concerns used by the server and its tests: logging setup
//! and the clock / wall-clock formatting module.

pub mod logger;
pub mod time;
