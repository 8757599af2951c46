//! `SQLite` store configuration and session factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::SqliteConnectOptions;

use lastvalue_app::ports::{LastValueStore, StoreStatus};
use lastvalue_domain::error::LastValueError;
use lastvalue_domain::time::DisplayZone;

use crate::error::StorageError;
use crate::reader::SqliteLastValueReader;

/// How long a session waits for a database lock before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the `SQLite` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the `last_value` database file.
    pub path: PathBuf,
    /// Maximum wait for a lock held by the writer.
    pub busy_timeout: Duration,
    /// Zone used to render observation times.
    pub zone: DisplayZone,
}

impl Config {
    /// Configuration with default timeout and local-time rendering.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            zone: DisplayZone::default(),
        }
    }

    /// Build a [`SqliteLastValueStore`] from this configuration.
    ///
    /// Nothing is opened here: every session connects on its own, so a
    /// store file that appears later is picked up.
    #[must_use]
    pub fn build(self) -> SqliteLastValueStore {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(self.busy_timeout)
            .pragma("query_only", "ON");

        SqliteLastValueStore {
            path: self.path,
            options,
            zone: self.zone,
        }
    }
}

/// Read-only `last_value` store opening one connection per session.
#[derive(Debug)]
pub struct SqliteLastValueStore {
    path: PathBuf,
    options: SqliteConnectOptions,
    zone: DisplayZone,
}

impl SqliteLastValueStore {
    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LastValueStore for SqliteLastValueStore {
    type Reader = SqliteLastValueReader;

    async fn open(&self) -> Result<SqliteLastValueReader, LastValueError> {
        if !self.path.exists() {
            return Err(StorageError::Missing {
                path: self.path.clone(),
            }
            .into());
        }

        let conn = self.options.connect().await.map_err(StorageError::from)?;
        tracing::trace!(path = %self.path.display(), "opened store session");
        Ok(SqliteLastValueReader::new(conn, self.zone))
    }

    fn status(&self) -> StoreStatus {
        StoreStatus {
            path: self.path.clone(),
            exists: self.path.exists(),
        }
    }
}
