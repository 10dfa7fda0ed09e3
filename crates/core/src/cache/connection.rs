//! Cache store connection management with pragma configuration.
//!
//! This module handles opening the SQLite database backing the response
//! cache, applying required pragmas for performance and concurrency
//! (WAL mode), and running migrations.

use super::migrations;
use crate::Error;
use std::path::Path;
use tokio_rusqlite::Connection;

/// Named response cache store handle.
///
/// One store instance is shared for the lifetime of the worker process
/// by both the install-time population routine and per-request
/// interception. The generation name scopes every read and write; rows
/// written under a different name are invisible to this handle.
///
/// Wraps a tokio-rusqlite Connection that runs database operations on a
/// background thread, so per-key operations are atomic from the
/// handlers' point of view.
#[derive(Clone, Debug)]
pub struct CacheStore {
    pub(crate) conn: Connection,
    pub(crate) name: String,
}

impl CacheStore {
    /// Open a store at the specified path under the given generation name.
    ///
    /// Creates the file if it doesn't exist, applies performance
    /// pragmas, and runs any pending migrations.
    pub async fn open(path: impl AsRef<Path>, name: &str) -> Result<Self, Error> {
        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        Self::init(conn, name).await
    }

    /// Open an in-memory store for testing.
    ///
    /// Creates a temporary in-memory SQLite database with the same
    /// pragma configuration as file-based stores.
    pub async fn open_in_memory(name: &str) -> Result<Self, Error> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| Error::Database(e.into()))?;
        Self::init(conn, name).await
    }

    async fn init(conn: Connection, name: &str) -> Result<Self, Error> {
        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;
                 PRAGMA temp_store=MEMORY;
                 PRAGMA foreign_keys=ON;",
            )?;
            Ok(())
        })
        .await
        .map_err(Error::Database)?;

        migrations::run(&conn).await?;

        tracing::debug!(generation = name, "opened cache");

        Ok(Self { conn, name: name.to_string() })
    }

    /// The cache generation name this handle reads and writes under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let store = CacheStore::open_in_memory("assets-v1").await.unwrap();
        assert_eq!(store.name(), "assets-v1");

        let version = store
            .conn
            .call(|conn| conn.query_row("SELECT sqlite_version()", [], |row| row.get::<_, String>(0)))
            .await
            .unwrap();
        assert!(!version.is_empty());
    }
}
