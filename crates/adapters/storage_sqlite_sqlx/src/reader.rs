//! `SQLite` implementation of [`LastValueReader`].

use sqlx::sqlite::SqliteRow;
use sqlx::{Connection, FromRow, Row, SqliteConnection};

use lastvalue_app::ports::LastValueReader;
use lastvalue_domain::error::LastValueError;
use lastvalue_domain::id::{ElementId, SourceId};
use lastvalue_domain::row::ValueRecord;
use lastvalue_domain::time::DisplayZone;
use lastvalue_domain::value::StoredValue;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper {
    value: StoredValue,
    system_time: i64,
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let value_type: String = row.try_get("value_type")?;
        let value = match value_type.as_str() {
            "integer" => StoredValue::Integer(row.try_get("value")?),
            "real" => StoredValue::Real(row.try_get("value")?),
            "text" => StoredValue::Text(row.try_get("value")?),
            "blob" => StoredValue::Blob(row.try_get("value")?),
            _ => StoredValue::Null,
        };
        let system_time: i64 = row.try_get("system_time")?;

        Ok(Self { value, system_time })
    }
}

// Records without an observation time can never be the latest one.
const SELECT_LAST: &str = r"
    SELECT
        value,
        typeof(value) AS value_type,
        CAST(system_time AS INTEGER) AS system_time
    FROM last_value
    WHERE dp_id = ? AND el_id = ? AND system_time IS NOT NULL
    ORDER BY system_time DESC
    LIMIT 1
";

/// A single read-only connection to the `last_value` table.
pub struct SqliteLastValueReader {
    conn: SqliteConnection,
    zone: DisplayZone,
}

impl SqliteLastValueReader {
    pub(crate) fn new(conn: SqliteConnection, zone: DisplayZone) -> Self {
        Self { conn, zone }
    }
}

impl LastValueReader for SqliteLastValueReader {
    async fn fetch_last(
        &mut self,
        source_id: SourceId,
        element_id: ElementId,
    ) -> Result<Option<ValueRecord>, LastValueError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_LAST)
            .bind(source_id.get())
            .bind(element_id.get())
            .fetch_optional(&mut self.conn)
            .await
            .map_err(StorageError::from)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(ValueRecord {
            source_id,
            element_id,
            value: row.value.into_text(),
            timestamp: self.zone.format_epoch_nanos(row.system_time),
        }))
    }

    async fn close(self) {
        if let Err(err) = self.conn.close().await {
            tracing::warn!(error = %err, "failed to close store session");
        }
    }
}
