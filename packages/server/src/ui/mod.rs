//! UI layer: HTTP / WebSocket surface built on axum.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
