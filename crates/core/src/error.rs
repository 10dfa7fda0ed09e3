//! Unified error types for the pre-cache worker.
//!
//! Install-time errors fail the whole population pass; interception
//! errors surface to the caller untouched. There is no fatal class.

use tokio_rusqlite::rusqlite;

/// Unified error types shared by the cache store and the worker handlers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A manifest entry or intercepted request URL could not be parsed.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Network-level fetch failure (connectivity, DNS, TLS, read error).
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Fetch exceeded the configured timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response body exceeded the configured byte limit.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// A manifest entry failed during install-time population.
    ///
    /// One failing entry fails the entire install; the host retries
    /// the whole population pass, never a single entry.
    #[error("POPULATION_FAILED: {url}: {reason}")]
    PopulationFailed { url: String, reason: String },

    /// Cache store operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A stored response row could not be decoded.
    #[error("CACHE_ERROR: corrupt stored response: {0}")]
    CorruptSnapshot(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_failure_display() {
        let err = Error::PopulationFailed {
            url: "https://example.com/missing.css".to_string(),
            reason: "status 404".to_string(),
        };
        assert!(err.to_string().contains("POPULATION_FAILED"));
        assert!(err.to_string().contains("missing.css"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_invalid_url_display() {
        let err = Error::InvalidUrl("empty URL".to_string());
        assert!(err.to_string().starts_with("INVALID_URL"));
    }
}
