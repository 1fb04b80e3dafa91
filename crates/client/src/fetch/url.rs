//! Page URL parsing and title fallback.

/// Error type for page URL parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse an operator-entered page URL.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Only http and https are accepted
/// 4. Remove fragment (#...)
pub fn parse_page_url(input: &str) -> Result<url::Url, UrlError> {
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

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Title used when the page has none: the last `/`-separated piece of the
/// URL as entered, or `article` when that piece is empty.
pub fn title_fallback(input: &str) -> String {
    match input.trim().rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => "article".to_string(),
    }
}

impl From<UrlError> for pagesift_core::Error {
    fn from(err: UrlError) -> Self {
        pagesift_core::Error::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let url = parse_page_url("https://example.com/news").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/news");
    }

    #[test]
    fn test_parse_default_scheme() {
        let url = parse_page_url("example.com").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_parse_removes_fragment_keeps_query() {
        let url = parse_page_url("https://example.com/a?x=1#top").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let url = parse_page_url("  http://example.com  ").unwrap();
        assert_eq!(url.as_str(), "http://example.com/");
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        let result = parse_page_url("ftp://example.com/file");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_url_error_converts_to_invalid_url() {
        let err = pagesift_core::Error::from(UrlError::UnsupportedScheme("ftp".into()));
        assert!(matches!(err, pagesift_core::Error::InvalidUrl(_)));
        assert_eq!(err.detail(), "unsupported scheme: ftp");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_page_url("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_title_fallback_last_segment() {
        assert_eq!(title_fallback("https://example.com/news/big-story"), "big-story");
        assert_eq!(title_fallback("https://example.com/page?id=3"), "page?id=3");
    }

    #[test]
    fn test_title_fallback_trailing_slash() {
        assert_eq!(title_fallback("https://example.com/news/"), "article");
    }
}
