//! # lastvalue-adapter-storage-sqlite-sqlx
//!
//! Read-only `SQLite` adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the store port traits defined in `lastvalue-app::ports::last_value`
//! - Open one read-only connection per session (`query_only`, bounded lock wait)
//! - Map `last_value` rows into domain records (value coercion, timestamp rendering)
//!
//! ## Dependency rule
//! Depends on `lastvalue-app` (for port traits) and `lastvalue-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod reader;
pub mod store;

#[cfg(test)]
mod testing;

pub use reader::SqliteLastValueReader;
pub use store::{Config, DEFAULT_BUSY_TIMEOUT, SqliteLastValueStore};
