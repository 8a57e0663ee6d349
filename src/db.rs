//src/db.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::APP_DIR;

const DB_FILE_NAME: &str = "fittrack.db";
const DATA_ENV_VAR: &str = "FITTRACK_DATA_DIR";

/// Storage key of the workout document (JSON object, day -> exercise names).
pub const WORKOUTS_KEY: &str = "fittrack_workouts";
/// Storage key of the theme preference ("light" or "dark").
pub const THEME_KEY: &str = "fittrack_theme";

// Custom Error type for DB operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database connection failed")]
    Connection(#[source] rusqlite::Error),
    #[error("Failed to get application data directory")]
    DataDir,
    #[error("I/O error accessing database file")]
    Io(#[from] std::io::Error),
    #[error("Database query failed: {0}")]
    QueryFailed(rusqlite::Error),
    #[error("Database write failed for key '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Database delete failed for key '{key}': {source}")]
    DeleteFailed {
        key: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// A stored value together with the time it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Gets the path to the SQLite database file within the app's data directory.
pub fn get_db_path() -> Result<PathBuf, Error> {
    let app_dir = match std::env::var(DATA_ENV_VAR) {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => dirs::data_dir().ok_or(Error::DataDir)?.join(APP_DIR),
    };
    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir)?;
    }
    Ok(app_dir.join(DB_FILE_NAME))
}

/// Opens a connection to the SQLite database.
pub fn open_db<P: AsRef<Path>>(path: P) -> Result<Connection, Error> {
    Connection::open(path).map_err(Error::Connection)
}

/// Initializes the key-value table if it doesn't exist.
pub fn init_db(conn: &Connection) -> Result<(), Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL -- chrono timestamp, UTC
        )",
        [],
    )
    .map_err(Error::Connection)?;
    Ok(())
}

/// Reads the value stored under `key`, if any.
pub fn get_value(conn: &Connection, key: &str) -> Result<Option<StoredValue>, Error> {
    conn.query_row(
        "SELECT value, updated_at FROM kv WHERE key = ?1",
        params![key],
        |row| {
            Ok(StoredValue {
                value: row.get(0)?,
                updated_at: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(Error::QueryFailed)
}

/// Replaces the value stored under `key` as a whole.
pub fn put_value(conn: &Connection, key: &str, value: &str) -> Result<DateTime<Utc>, Error> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, now],
    )
    .map_err(|source| Error::WriteFailed {
        key: key.to_string(),
        source,
    })?;
    tracing::debug!(key, bytes = value.len(), "stored value");
    Ok(now)
}

/// Removes `key` entirely. Returns whether a row was deleted.
pub fn delete_value(conn: &Connection, key: &str) -> Result<bool, Error> {
    let rows = conn
        .execute("DELETE FROM kv WHERE key = ?1", params![key])
        .map_err(|source| Error::DeleteFailed {
            key: key.to_string(),
            source,
        })?;
    tracing::debug!(key, rows, "deleted value");
    Ok(rows > 0)
}
