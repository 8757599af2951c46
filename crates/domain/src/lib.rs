//! # lastvalue-domain
//!
//! Pure domain model for the Schuler last-value dashboard.
//!
//! ## Responsibilities
//! - Foundational types: numeric source/element identifiers, error conventions,
//!   timestamp rendering
//! - Define the **Registry** (machines, ordered elements, labels)
//! - Define **stored values** and their textual coercion
//! - Define **Rows** (one rendered machine × element cell) and their
//!   **grouping** by machine
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod grouping;
pub mod registry;
pub mod row;
pub mod value;
