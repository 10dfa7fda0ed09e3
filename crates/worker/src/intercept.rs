//! Request interception policy: cache-first with network fallback.
//!
//! Every intercepted request is answered through exactly one of two
//! paths: a stored response from the cache store, or a live network
//! fetch on a miss. The miss result is returned verbatim (HTTP error
//! statuses included) and is never written back into the store — there
//! is no lazy population and no offline-fallback page.

use bytes::Bytes;
use precache_core::{CacheStore, Error, ResponseSnapshot};
use url::Url;

use crate::fetch::url::canonicalize;
use crate::fetch::{Fetch, FetchResponse, header_pairs};

/// An intercepted request descriptor.
///
/// Only method and URL participate in the cache key; headers are
/// ignored by this design.
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    pub method: String,
    pub url: Url,
}

impl InterceptedRequest {
    /// Build a GET request from a raw URL string, canonicalizing it so
    /// lookups agree with install-time keys.
    pub fn get(url: &str) -> Result<Self, Error> {
        let url = canonicalize(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self { method: "GET".to_string(), url })
    }

    /// The cache key this request is looked up under.
    pub fn key(&self) -> String {
        precache_core::cache::request_key(&self.method, self.url.as_str())
    }
}

/// Which path answered an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeSource {
    /// Stored response from the cache; the network was not contacted.
    Cache,
    /// Live network fetch on a cache miss.
    Network,
}

/// Response handed back to the host for an intercepted request.
#[derive(Debug, Clone)]
pub struct ServedResponse {
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub source: ServeSource,
}

impl ServedResponse {
    fn from_snapshot(snapshot: ResponseSnapshot) -> Self {
        Self {
            url: snapshot.url,
            status: snapshot.status,
            headers: snapshot.headers,
            body: Bytes::from(snapshot.body),
            source: ServeSource::Cache,
        }
    }

    fn from_network(response: FetchResponse) -> Self {
        Self {
            url: response.url.to_string(),
            status: response.status.as_u16(),
            headers: header_pairs(&response.headers),
            body: response.bytes,
            source: ServeSource::Network,
        }
    }
}

/// Answer an intercepted request, cache first.
///
/// On a hit the stored response is returned and the fetcher is never
/// called. On a miss the live fetch result is returned directly;
/// network failures propagate to the caller untranslated, and the
/// store is left untouched either way.
pub async fn on_intercept(
    request: &InterceptedRequest,
    store: &CacheStore,
    fetcher: &dyn Fetch,
) -> Result<ServedResponse, Error> {
    let key = request.key();

    if let Some(snapshot) = store.match_request(&key).await? {
        tracing::debug!(url = %request.url, "served from cache");
        return Ok(ServedResponse::from_snapshot(snapshot));
    }

    let response = fetcher.fetch(&request.url).await?;
    tracing::debug!(url = %request.url, status = response.status.as_u16(), "cache miss, served from network");
    Ok(ServedResponse::from_network(response))
}
