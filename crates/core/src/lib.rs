//! Core types and shared functionality for the offline pre-cache worker.
//!
//! This crate provides:
//! - Named response cache store with SQLite backend
//! - Request keying (method + canonical URL)
//! - Unified error types
//! - Worker configuration

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStore, ResponseSnapshot};
pub use config::WorkerConfig;
pub use error::Error;
