//! Worker-side logic for the offline pre-cache worker.
//!
//! This crate provides the network fetch client, the asset manifest,
//! and the two event handlers the host-adapter shim drives:
//!
//! - [`on_install`] — install-time population of the cache store from
//!   the asset manifest (all-or-nothing).
//! - [`on_intercept`] — per-request cache-first serving with live
//!   network fallback on a miss (no write-back).
//!
//! The shim itself (event registration, awaiting the returned futures)
//! is host-specific and not part of this crate.

pub mod fetch;
pub mod install;
pub mod intercept;
pub mod manifest;

pub use fetch::{Fetch, FetchClient, FetchConfig, FetchResponse};
pub use install::on_install;
pub use intercept::{InterceptedRequest, ServeSource, ServedResponse, on_intercept};
pub use manifest::AssetManifest;
