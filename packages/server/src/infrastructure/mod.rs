//! Infrastructure layer: wire DTOs, the WebSocket-backed connection
//! registry and concrete collaborator implementations.

pub mod dto;
pub mod registry;
pub mod repository;
pub mod session;
