//! Storage-specific error type wrapping sqlx errors.

use std::path::PathBuf;

use lastvalue_domain::error::LastValueError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database file does not exist.
    #[error("database file not found at {}", .path.display())]
    Missing { path: PathBuf },

    /// A connection, lock wait, or query failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for LastValueError {
    fn from(err: StorageError) -> Self {
        Self::StoreUnavailable(Box::new(err))
    }
}
