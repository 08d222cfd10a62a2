//! Connection Registry の実装
//!
//! - `websocket`: WebSocket の push チャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketConnectionRegistry;
