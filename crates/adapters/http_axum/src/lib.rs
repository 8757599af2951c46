//! # lastvalue-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for programmatic access
//!   (`/api/schuler`, `/value/{source_id}/{element_id}`, `/health`)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript** — one table per machine, optional
//!   `<meta http-equiv="refresh">` for periodic reloads
//! - Serve the landing page and static assets
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Dependency rule
//! Depends on `lastvalue-app` (for port traits and services) and
//! `lastvalue-domain` (for domain types used in response mapping). Never leaks
//! axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
