//! SQLite-backed response cache for pre-populated assets.
//!
//! This module provides a persistent, named key-value cache mapping a
//! request key (method + canonical URL) to a stored response snapshot,
//! with async access via tokio-rusqlite. It supports:
//!
//! - A single named cache generation per store handle
//! - Request keying via SHA-256 hashing
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//!
//! There is deliberately no purge or eviction surface: the store is
//! populated once at install time and read thereafter. Rows written
//! under an old generation name are orphaned when the name changes.

pub mod connection;
pub mod key;
pub mod migrations;
pub mod responses;

pub use crate::Error;

pub use connection::CacheStore;
pub use key::request_key;
pub use responses::ResponseSnapshot;
