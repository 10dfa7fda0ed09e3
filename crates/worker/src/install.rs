//! Install-time population routine.
//!
//! Fetches every asset manifest entry and writes the response into the
//! cache store. The pass is all-or-nothing from the host's point of
//! view: the first failing entry fails the whole install, and the host
//! is expected to retry installation wholesale on the next activation
//! attempt. Partial writes from a failed pass may remain in the store;
//! a retried pass overwrites them key by key.

use precache_core::{CacheStore, Error, ResponseSnapshot};

use crate::fetch::{Fetch, header_pairs};
use crate::manifest::AssetManifest;

/// Populate the cache store from the asset manifest.
///
/// Entries are fetched sequentially in manifest order. A response must
/// be 2xx to be stored; anything else — network error, timeout,
/// oversized body, HTTP error status — aborts the pass with
/// [`Error::PopulationFailed`] naming the offending URL.
pub async fn on_install(manifest: &AssetManifest, store: &CacheStore, fetcher: &dyn Fetch) -> Result<(), Error> {
    for entry in manifest.entries() {
        let response = fetcher
            .fetch(entry)
            .await
            .map_err(|e| Error::PopulationFailed { url: entry.to_string(), reason: e.to_string() })?;

        if !response.status.is_success() {
            return Err(Error::PopulationFailed {
                url: entry.to_string(),
                reason: format!("status {}", response.status.as_u16()),
            });
        }

        let snapshot = ResponseSnapshot::new(
            "GET",
            entry.as_str(),
            response.status.as_u16(),
            header_pairs(&response.headers),
            response.bytes.to_vec(),
        );
        store.put(&snapshot).await?;

        tracing::debug!(url = %entry, bytes = snapshot.body.len(), "pre-cached");
    }

    tracing::info!(
        entries = manifest.len(),
        cache = store.name(),
        "installation complete"
    );

    Ok(())
}
