//! Asset manifest: the static list of resources to pre-cache.
//!
//! The list is closed before installation begins and never mutated at
//! runtime. Entries are resolved against the worker scope when the
//! manifest is built, so a malformed entry fails fast, before any
//! network traffic or store writes.

use precache_core::{Error, WorkerConfig};
use url::Url;

use crate::fetch::url::{canonicalize, resolve};

/// Static ordered list of resources to populate at install time.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    scope: Url,
    entries: Vec<Url>,
}

impl AssetManifest {
    /// Resolve raw manifest entries against a scope origin.
    ///
    /// Relative entries (`/`, `/index.html`) join the scope; absolute
    /// entries (including cross-origin CDN URLs) are canonicalized
    /// as-is. Order is preserved.
    pub fn resolve(scope: &str, entries: &[String]) -> Result<Self, Error> {
        let scope = canonicalize(scope).map_err(|e| Error::InvalidUrl(format!("scope {scope}: {e}")))?;

        let mut resolved = Vec::with_capacity(entries.len());
        for entry in entries {
            let url = resolve(&scope, entry).map_err(|e| Error::InvalidUrl(format!("{entry}: {e}")))?;
            resolved.push(url);
        }

        Ok(Self { scope, entries: resolved })
    }

    /// Build the manifest from worker configuration.
    pub fn from_config(config: &WorkerConfig) -> Result<Self, Error> {
        Self::resolve(&config.scope, &config.precache)
    }

    /// The scope origin relative entries were resolved against.
    pub fn scope(&self) -> &Url {
        &self.scope
    }

    /// Resolved entries in manifest order.
    pub fn entries(&self) -> &[Url] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
