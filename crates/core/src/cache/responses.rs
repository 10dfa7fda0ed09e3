//! Stored response operations.
//!
//! Provides functions for writing and looking up cached response
//! snapshots under the store's generation name. There is no update or
//! delete surface: population overwrites by key, interception only reads.

use super::connection::CacheStore;
use super::key::request_key;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A stored response snapshot.
///
/// Captures everything needed to answer an intercepted request without
/// touching the network: status, headers, and body, plus the request
/// identity the snapshot was stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub key: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub stored_at: String,
}

impl ResponseSnapshot {
    /// Build a snapshot for a response to `method url`.
    ///
    /// The URL must already be canonical; the key is derived from it.
    pub fn new(method: &str, url: &str, status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            key: request_key(method, url),
            method: method.to_uppercase(),
            url: url.to_string(),
            status,
            headers,
            body,
            stored_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl CacheStore {
    /// Insert or overwrite a stored response.
    ///
    /// Uses UPSERT semantics so a retried installation replaces whatever
    /// a previous partial pass left under the same key.
    pub async fn put(&self, snapshot: &ResponseSnapshot) -> Result<(), Error> {
        let generation = self.name.clone();
        let snapshot = snapshot.clone();
        let headers_json =
            serde_json::to_string(&snapshot.headers).map_err(|e| Error::CorruptSnapshot(e.to_string()))?;
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO responses (
                    generation, key, method, url, status, headers_json, body, stored_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(generation, key) DO UPDATE SET
                    method = excluded.method,
                    url = excluded.url,
                    status = excluded.status,
                    headers_json = excluded.headers_json,
                    body = excluded.body,
                    stored_at = excluded.stored_at",
                    params![
                        &generation,
                        &snapshot.key,
                        &snapshot.method,
                        &snapshot.url,
                        snapshot.status as i64,
                        &headers_json,
                        &snapshot.body,
                        &snapshot.stored_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up a stored response by request key.
    ///
    /// Returns None if the key doesn't exist under this generation.
    pub async fn match_request(&self, key: &str) -> Result<Option<ResponseSnapshot>, Error> {
        let generation = self.name.clone();
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<ResponseSnapshot>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT key, method, url, status, headers_json, body, stored_at
                FROM responses WHERE generation = ?1 AND key = ?2",
                )?;

                let result = stmt.query_row(params![generation, key], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Vec<u8>>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                });

                match result {
                    Ok((key, method, url, status, headers_json, body, stored_at)) => {
                        let headers = match headers_json {
                            Some(json) => {
                                serde_json::from_str(&json).map_err(|e| Error::CorruptSnapshot(e.to_string()))?
                            }
                            None => Vec::new(),
                        };
                        Ok(Some(ResponseSnapshot {
                            key,
                            method,
                            url,
                            status: status as u16,
                            headers,
                            body,
                            stored_at,
                        }))
                    }
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Check whether a request key has a stored response.
    pub async fn contains(&self, key: &str) -> Result<bool, Error> {
        let generation = self.name.clone();
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let present: bool = conn
                    .query_row(
                        "SELECT EXISTS(
                    SELECT 1 FROM responses WHERE generation = ?1 AND key = ?2
                )",
                        params![generation, key],
                        |row| row.get(0),
                    )
                    .map_err(Error::from)?;

                Ok(present)
            })
            .await
            .map_err(Error::from)
    }

    /// Whether this generation has no stored responses yet.
    pub async fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len().await? == 0)
    }

    /// Number of stored responses under this generation.
    pub async fn len(&self) -> Result<u64, Error> {
        let generation = self.name.clone();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM responses WHERE generation = ?1",
                    params![generation],
                    |row| row.get(0),
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_snapshot(url: &str) -> ResponseSnapshot {
        ResponseSnapshot::new(
            "GET",
            url,
            200,
            vec![("content-type".to_string(), "text/html".to_string())],
            b"<html></html>".to_vec(),
        )
    }

    #[tokio::test]
    async fn test_put_and_match() {
        let store = CacheStore::open_in_memory("assets-v1").await.unwrap();
        let snapshot = make_test_snapshot("https://example.com/");

        store.put(&snapshot).await.unwrap();

        let retrieved = store.match_request(&snapshot.key).await.unwrap().unwrap();
        assert_eq!(retrieved.url, snapshot.url);
        assert_eq!(retrieved.status, 200);
        assert_eq!(retrieved.headers, snapshot.headers);
        assert_eq!(retrieved.body, snapshot.body);
    }

    #[tokio::test]
    async fn test_match_missing() {
        let store = CacheStore::open_in_memory("assets-v1").await.unwrap();
        let result = store.match_request("nonexistent").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_by_key() {
        let store = CacheStore::open_in_memory("assets-v1").await.unwrap();
        let first = make_test_snapshot("https://example.com/");
        store.put(&first).await.unwrap();

        let second = ResponseSnapshot::new("GET", "https://example.com/", 200, Vec::new(), b"updated".to_vec());
        store.put(&second).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        let retrieved = store.match_request(&first.key).await.unwrap().unwrap();
        assert_eq!(retrieved.body, b"updated");
    }

    #[tokio::test]
    async fn test_generations_are_disjoint() {
        let v1 = CacheStore::open_in_memory("assets-v1").await.unwrap();
        let snapshot = make_test_snapshot("https://example.com/");
        v1.put(&snapshot).await.unwrap();

        // Same key under a different generation name stays invisible.
        let v2 = CacheStore { conn: v1.conn.clone(), name: "assets-v2".to_string() };
        assert!(v2.match_request(&snapshot.key).await.unwrap().is_none());
        assert!(v1.match_request(&snapshot.key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_contains() {
        let store = CacheStore::open_in_memory("assets-v1").await.unwrap();
        let snapshot = make_test_snapshot("https://example.com/index.html");
        assert!(!store.contains(&snapshot.key).await.unwrap());

        store.put(&snapshot).await.unwrap();
        assert!(store.contains(&snapshot.key).await.unwrap());
    }
}
