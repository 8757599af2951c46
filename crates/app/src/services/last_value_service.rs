//! Last-value service — assembles dashboard rows from the store.

use std::sync::Arc;

use lastvalue_domain::error::{LastValueError, NotFoundError};
use lastvalue_domain::grouping::MachineGroups;
use lastvalue_domain::id::{ElementId, SourceId};
use lastvalue_domain::registry::Registry;
use lastvalue_domain::row::{Reading, Row, ValueRecord};

use crate::ports::{LastValueReader, LastValueStore, StoreStatus};

/// Application service for reading the latest machine values.
pub struct LastValueService<S> {
    registry: Arc<Registry>,
    store: S,
}

impl<S: LastValueStore> LastValueService<S> {
    /// Create a new service over the given registry and store.
    pub fn new(registry: Arc<Registry>, store: S) -> Self {
        Self { registry, store }
    }

    /// The registry rows are assembled from.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Build one row per configured machine × element, machine-major.
    ///
    /// A single store session is used for the whole assembly and released
    /// before returning, on success and on failure alike. Pairs without a
    /// record yield a row without a reading.
    ///
    /// # Errors
    ///
    /// Returns [`LastValueError::StoreUnavailable`] if the session cannot be
    /// opened or any lookup fails. No partial row set is ever returned.
    pub async fn build_rows(&self) -> Result<Vec<Row>, LastValueError> {
        let mut reader = self.store.open().await?;
        let result = self.assemble(&mut reader).await;
        reader.close().await;

        let rows = result?;
        tracing::debug!(
            rows = rows.len(),
            readings = rows.iter().filter(|row| row.reading.is_some()).count(),
            "assembled last-value rows"
        );
        Ok(rows)
    }

    /// Build all rows and group them by machine.
    ///
    /// # Errors
    ///
    /// Same as [`Self::build_rows`].
    pub async fn machine_groups(&self) -> Result<MachineGroups, LastValueError> {
        let rows = self.build_rows().await?;
        Ok(MachineGroups::from_rows(&self.registry, rows))
    }

    /// Look up the last value of a single pair, which need not be configured.
    ///
    /// # Errors
    ///
    /// Returns [`LastValueError::NotFound`] when the store has no record for
    /// the pair, or [`LastValueError::StoreUnavailable`] on store failure.
    pub async fn fetch_value(
        &self,
        source_id: SourceId,
        element_id: ElementId,
    ) -> Result<ValueRecord, LastValueError> {
        let mut reader = self.store.open().await?;
        let result = reader.fetch_last(source_id, element_id).await;
        reader.close().await;

        result?.ok_or_else(|| {
            NotFoundError {
                source_id,
                element_id,
            }
            .into()
        })
    }

    /// Report where the store is expected and whether it exists.
    #[must_use]
    pub fn store_status(&self) -> StoreStatus {
        self.store.status()
    }

    async fn assemble(&self, reader: &mut S::Reader) -> Result<Vec<Row>, LastValueError> {
        let mut rows = Vec::with_capacity(self.registry.cell_count());
        for machine in self.registry.machines() {
            for &element_id in self.registry.elements() {
                let record = reader.fetch_last(machine.source_id, element_id).await?;
                rows.push(Row {
                    machine_name: machine.name.clone(),
                    source_id: machine.source_id,
                    label: self.registry.label(element_id).into_owned(),
                    element_id,
                    reading: record.map(Reading::from),
                });
            }
        }
        Ok(rows)
    }
}
