//! Last-value store port — read-only access to the `last_value` table.

use std::future::Future;
use std::path::PathBuf;

use lastvalue_domain::error::LastValueError;
use lastvalue_domain::id::{ElementId, SourceId};
use lastvalue_domain::row::ValueRecord;

/// Where the store lives and whether it is currently present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub path: PathBuf,
    pub exists: bool,
}

/// A read-only store that hands out one session per unit of work.
pub trait LastValueStore {
    /// Session type holding a single connection.
    type Reader: LastValueReader + Send;

    /// Acquire a session.
    ///
    /// Fails with [`LastValueError::StoreUnavailable`] when the store is
    /// missing, locked past its timeout, or cannot be opened.
    fn open(&self) -> impl Future<Output = Result<Self::Reader, LastValueError>> + Send;

    /// Report the configured location of the store.
    fn status(&self) -> StoreStatus;
}

/// An open session on the store. Dropping it releases the connection.
pub trait LastValueReader: Sized {
    /// Return the record with the latest timestamp for the pair, if any.
    fn fetch_last(
        &mut self,
        source_id: SourceId,
        element_id: ElementId,
    ) -> impl Future<Output = Result<Option<ValueRecord>, LastValueError>> + Send;

    /// Release the session.
    fn close(self) -> impl Future<Output = ()> + Send;
}
