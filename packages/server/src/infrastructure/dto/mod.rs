//! Data Transfer Objects for the wire protocol.
//!
//! - `envelope`: the JSON envelope union sent to clients
//! - `conversion`: domain entity → envelope builders

pub mod conversion;
pub mod envelope;
