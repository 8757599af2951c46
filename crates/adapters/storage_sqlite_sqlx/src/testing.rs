//! Fixtures for tests: a writable `last_value` database in a temp directory.

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

const CREATE_TABLE: &str = r"
    CREATE TABLE last_value (
        dp_id INTEGER NOT NULL,
        el_id INTEGER NOT NULL,
        value,
        system_time INTEGER
    )
";

/// Nanoseconds since the epoch for 2024-01-01 10:00:00 UTC.
pub(crate) const NEW_YEAR_TEN_AM: i64 = 1_704_103_200_000_000_000;

/// Create an empty `last_value.sqlite` inside `dir`.
pub(crate) async fn create_store(dir: &Path) -> PathBuf {
    let path = dir.join("last_value.sqlite");
    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await
        .unwrap();
    sqlx::query(CREATE_TABLE).execute(&mut conn).await.unwrap();
    conn.close().await.unwrap();
    path
}

/// Insert one record; `values` is the SQL literal list
/// `dp_id, el_id, value, system_time`.
pub(crate) async fn insert(path: &Path, values: &str) {
    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .connect()
        .await
        .unwrap();
    sqlx::query(&format!(
        "INSERT INTO last_value (dp_id, el_id, value, system_time) VALUES ({values})"
    ))
    .execute(&mut conn)
    .await
    .unwrap();
    conn.close().await.unwrap();
}
