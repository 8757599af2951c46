//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`LastValueError`] via `From`. A missing reading inside a row is never an
//! error; only single-pair lookups report [`NotFoundError`].

use crate::id::{ElementId, SourceId};

/// Top-level error shared by the application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum LastValueError {
    /// The registry or a request violated a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// No record exists for the requested pair.
    #[error("value not found")]
    NotFound(#[from] NotFoundError),

    /// The store could not be opened or queried.
    #[error("store unavailable")]
    StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Registry invariant violations (detected at startup) and malformed
/// request identifiers.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("machine name must not be empty")]
    EmptyMachineName,

    #[error("machine {0:?} is declared more than once")]
    DuplicateMachine(String),

    #[error("at least one machine must be configured")]
    NoMachines,

    #[error("at least one element must be configured")]
    NoElements,

    #[error("{0:?} is not a valid identifier")]
    InvalidIdentifier(String),
}

/// No record exists for a (source, element) pair.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("no value for dp_id={source_id} and el_id={element_id}")]
pub struct NotFoundError {
    pub source_id: SourceId,
    pub element_id: ElementId,
}
