//! # lastvalue-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LastValueStore` — open a read-only session on the store
//!   - `LastValueReader` — look up the last value of a (source, element) pair
//! - Define the **driving/inbound** use-case:
//!   - `LastValueService` — assemble rows, group them, single-pair lookup
//! - Orchestrate domain objects without knowing *how* the store is read
//!
//! ## Dependency rule
//! Depends on `lastvalue-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
