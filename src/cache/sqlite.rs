//! SQLite-backed cache storage.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::Connection;

use super::backend::{CacheBackend, StoredEntry};
use super::key::CacheKey;
use crate::{Error, Result};

/// Configuration for [`SqliteBackend`].
#[derive(Debug, Clone)]
pub struct SqliteBackendConfig {
    /// Path to the SQLite database file. Use `":memory:"` for an in-memory
    /// database.
    pub path: String,
}

impl SqliteBackendConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Configuration for an in-memory SQLite database.
    pub fn in_memory() -> Self {
        Self {
            path: ":memory:".to_string(),
        }
    }
}

/// Durable [`CacheBackend`] over a single SQLite database.
///
/// Entries live in a `plan_cache` table keyed by cache key with a unix-epoch
/// creation timestamp. SQLite calls run under `tokio::task::spawn_blocking`
/// so they do not block the async runtime.
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Open (or create) the database and initialize the cache table.
    pub fn new(config: SqliteBackendConfig) -> Result<Self> {
        let conn = Connection::open(&config.path)
            .map_err(|e| Error::store(format!("sqlite open error: {e}")))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS plan_cache (
                cache_key TEXT PRIMARY KEY,
                payload BLOB NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (unixepoch())
            )",
            [],
        )
        .map_err(|e| Error::store(format!("sqlite create table error: {e}")))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(_) => 0,
    }
}

#[async_trait]
impl CacheBackend for SqliteBackend {
    async fn get(&self, key: &CacheKey) -> Result<Option<StoredEntry>> {
        let conn = self.conn.clone();
        let key = key.as_str().to_string();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| Error::store(format!("lock error: {e}")))?;

            let mut stmt = conn
                .prepare("SELECT payload, created_at FROM plan_cache WHERE cache_key = ?1")
                .map_err(|e| Error::store(format!("sqlite prepare error: {e}")))?;

            let result = stmt.query_row(rusqlite::params![key], |row| {
                Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, i64>(1)?))
            });

            match result {
                Ok((data, created_at)) => Ok(Some(StoredEntry {
                    data,
                    created_at: UNIX_EPOCH + Duration::from_secs(created_at.max(0) as u64),
                })),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(Error::store(format!("sqlite query error: {e}"))),
            }
        })
        .await
        .map_err(|e| Error::store(format!("spawn_blocking error: {e}")))?
    }

    async fn set(&self, key: &CacheKey, value: &[u8]) -> Result<()> {
        let conn = self.conn.clone();
        let key = key.as_str().to_string();
        let value = value.to_vec();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| Error::store(format!("lock error: {e}")))?;

            conn.execute(
                "INSERT OR REPLACE INTO plan_cache (cache_key, payload, created_at)
                 VALUES (?1, ?2, unixepoch())",
                rusqlite::params![key, value],
            )
            .map_err(|e| Error::store(format!("sqlite insert error: {e}")))?;

            Ok(())
        })
        .await
        .map_err(|e| Error::store(format!("spawn_blocking error: {e}")))?
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        let conn = self.conn.clone();
        let key = key.as_str().to_string();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| Error::store(format!("lock error: {e}")))?;

            let deleted = conn
                .execute("DELETE FROM plan_cache WHERE cache_key = ?1", rusqlite::params![key])
                .map_err(|e| Error::store(format!("sqlite delete error: {e}")))?;

            Ok(deleted > 0)
        })
        .await
        .map_err(|e| Error::store(format!("spawn_blocking error: {e}")))?
    }

    async fn purge_older_than(&self, cutoff: SystemTime) -> Result<usize> {
        let conn = self.conn.clone();
        let cutoff = unix_seconds(cutoff);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| Error::store(format!("lock error: {e}")))?;

            let removed = conn
                .execute(
                    "DELETE FROM plan_cache WHERE created_at < ?1",
                    rusqlite::params![cutoff],
                )
                .map_err(|e| Error::store(format!("sqlite purge error: {e}")))?;

            Ok(removed)
        })
        .await
        .map_err(|e| Error::store(format!("spawn_blocking error: {e}")))?
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| Error::store(format!("lock error: {e}")))?;

            conn.execute("DELETE FROM plan_cache", [])
                .map_err(|e| Error::store(format!("sqlite delete error: {e}")))?;

            Ok(())
        })
        .await
        .map_err(|e| Error::store(format!("spawn_blocking error: {e}")))?
    }

    async fn len(&self) -> Result<usize> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| Error::store(format!("lock error: {e}")))?;

            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM plan_cache", [], |row| row.get(0))
                .map_err(|e| Error::store(format!("sqlite count error: {e}")))?;

            Ok(count as usize)
        })
        .await
        .map_err(|e| Error::store(format!("spawn_blocking error: {e}")))?
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
