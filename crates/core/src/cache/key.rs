//! Request cache key generation.
//!
//! Headers do not participate in the key: two requests for the same
//! method and canonical URL always map to the same row.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request.
///
/// The URL is expected to already be in canonical form; the caller is
/// responsible for normalization so that lookups and population writes
/// agree on the key.
pub fn request_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_uppercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_stability() {
        let key1 = request_key("GET", "https://example.com/");
        let key2 = request_key("GET", "https://example.com/");
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_method_case_insensitive() {
        let upper = request_key("GET", "https://example.com/");
        let lower = request_key("get", "https://example.com/");
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_key_different_url() {
        let root = request_key("GET", "https://example.com/");
        let index = request_key("GET", "https://example.com/index.html");
        assert_ne!(root, index);
    }

    #[test]
    fn test_key_different_method() {
        let get = request_key("GET", "https://example.com/");
        let head = request_key("HEAD", "https://example.com/");
        assert_ne!(get, head);
    }

    #[test]
    fn test_key_format() {
        let key = request_key("GET", "https://example.com/");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
