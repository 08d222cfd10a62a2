//! MessageStore の実装
//!
//! - `inmemory`: Vec をインメモリ DB として使う実装
//! - 将来的に: PostgreSQL などの DBMS

pub mod inmemory;

pub use inmemory::InMemoryMessageStore;
