//! URL canonicalization and manifest entry resolution.
//!
//! The population routine and the interception policy must agree on the
//! exact URL string that feeds the request key, so both go through the
//! same canonicalization here.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize an absolute URL string.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(mut host) = parsed.host_str() {
        let h = host.to_lowercase();
        host = h.as_str();
        parsed
            .set_host(Some(host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Resolve a manifest entry against the worker scope.
///
/// Entries carrying a scheme are canonicalized as absolute URLs
/// (cross-origin entries are allowed); everything else is treated as a
/// path relative to the scope origin, as a browser would resolve it.
pub fn resolve(scope: &url::Url, entry: &str) -> Result<url::Url, UrlError> {
    let trimmed = entry.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    if trimmed.contains("://") {
        return canonicalize(trimmed);
    }

    let mut joined = scope.join(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    joined.set_fragment(None);
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> url::Url {
        url::Url::parse("http://localhost:8000").unwrap()
    }

    #[test]
    fn test_canonicalize_basic() {
        let url = canonicalize("https://example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_canonicalize_lowercase_host() {
        let url = canonicalize("https://EXAMPLE.COM").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_canonicalize_remove_fragment() {
        let url = canonicalize("https://example.com#section").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_canonicalize_preserve_query() {
        let url = canonicalize("https://example.com?a=1&b=2").unwrap();
        assert_eq!(url.query(), Some("a=1&b=2"));
    }

    #[test]
    fn test_canonicalize_trim_whitespace() {
        let url = canonicalize("  https://example.com  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_canonicalize_unsupported_scheme() {
        let result = canonicalize("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        let result = canonicalize("");
        assert!(matches!(result, Err(UrlError::Empty)));
    }

    #[test]
    fn test_resolve_root() {
        let url = resolve(&scope(), "/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_resolve_relative_path() {
        let url = resolve(&scope(), "/index.html").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/index.html");
    }

    #[test]
    fn test_resolve_cross_origin() {
        let url = resolve(&scope(), "https://cdn.tailwindcss.com").unwrap();
        assert_eq!(url.host_str(), Some("cdn.tailwindcss.com"));
    }

    #[test]
    fn test_resolve_empty() {
        let result = resolve(&scope(), "   ");
        assert!(matches!(result, Err(UrlError::Empty)));
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let url = resolve(&scope(), "/index.html#top").unwrap();
        assert_eq!(url.fragment(), None);
    }
}
