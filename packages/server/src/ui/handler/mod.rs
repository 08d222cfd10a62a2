//! HTTP / WebSocket endpoint handlers.

pub mod http;
pub mod websocket;

pub use http::{debug_presence, health_check};
pub use websocket::websocket_handler;
