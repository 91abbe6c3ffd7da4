//! URL validation and normalization.
//!
//! Ensures consistent URL representation so that the same destination always
//! maps to the same short link.

use url::{ParseError, Url};

/// Maximum length of a normalized URL.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,

    #[error("URL is too long (max {MAX_URL_LENGTH} characters)")]
    TooLong,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Scheme-less input**: `example.com/a` becomes `https://example.com/a`
///    (it must contain a dot and no spaces)
/// 2. **Protocol**: Only HTTP and HTTPS are allowed
/// 3. **Hostname**: Required, converted to lowercase
/// 4. **Default ports**: Removed (80 for HTTP, 443 for HTTPS)
/// 5. **Fragments**: Removed (e.g., `#section`)
/// 6. **Path and query**: Preserved as-is
/// 7. **Length**: At most [`MAX_URL_LENGTH`] characters
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("HTTPS://EXAMPLE.COM:443/Path#top").unwrap(),
///     "https://example.com/Path"
/// );
/// assert_eq!(normalize_url("example.com/a").unwrap(), "https://example.com/a");
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let mut url = match Url::parse(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        // `example.com:8080/path` parses with `example.com` as the scheme.
        Ok(url) if !input.contains("://") && url.scheme().contains('.') => {
            parse_without_scheme(input)?
        }
        Ok(_) => return Err(UrlNormalizationError::UnsupportedProtocol),
        Err(ParseError::RelativeUrlWithoutBase) => parse_without_scheme(input)?,
        Err(e) => return Err(UrlNormalizationError::InvalidFormat(e.to_string())),
    };

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?
        .to_ascii_lowercase();
    url.set_host(Some(&host)).map_err(|_| {
        UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
    })?;

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    let normalized = String::from(url);
    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    Ok(normalized)
}

/// Parses a URL typed without a scheme, defaulting to HTTPS.
fn parse_without_scheme(input: &str) -> Result<Url, UrlNormalizationError> {
    if !input.contains('.') || input.contains(char::is_whitespace) {
        return Err(UrlNormalizationError::InvalidFormat(
            "expected a URL such as https://example.com".to_string(),
        ));
    }

    Url::parse(&format!("https://{input}"))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple_https() {
        let result = normalize_url("https://example.com");
        assert_eq!(result.unwrap(), "https://example.com/");
    }

    #[test]
    fn test_normalize_uppercase_host() {
        let result = normalize_url("https://EXAMPLE.COM/Path");
        assert_eq!(result.unwrap(), "https://example.com/Path");
    }

    #[test]
    fn test_normalize_remove_default_ports() {
        assert_eq!(
            normalize_url("http://example.com:80/path").unwrap(),
            "http://example.com/path"
        );
        assert_eq!(
            normalize_url("https://example.com:443/path").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_keep_custom_port() {
        let result = normalize_url("http://example.com:8080/path");
        assert_eq!(result.unwrap(), "http://example.com:8080/path");
    }

    #[test]
    fn test_normalize_remove_fragment_keep_query() {
        let result = normalize_url("https://example.com/page?key=VALUE#section");
        assert_eq!(result.unwrap(), "https://example.com/page?key=VALUE");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let result = normalize_url("  https://example.com/a  ");
        assert_eq!(result.unwrap(), "https://example.com/a");
    }

    #[test]
    fn test_normalize_scheme_less_input() {
        assert_eq!(
            normalize_url("example.com/a").unwrap(),
            "https://example.com/a"
        );
        assert_eq!(normalize_url("Example.COM").unwrap(), "https://example.com/");
    }

    #[test]
    fn test_normalize_scheme_less_with_port() {
        let result = normalize_url("example.com:8080/path");
        assert_eq!(result.unwrap(), "https://example.com:8080/path");
    }

    #[test]
    fn test_normalize_scheme_less_without_dot() {
        let result = normalize_url("localhost/path");
        assert!(matches!(
            result.unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_normalize_with_spaces() {
        let result = normalize_url("not a valid url.com");
        assert!(matches!(
            result.unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_normalize_empty_string() {
        assert!(matches!(
            normalize_url("").unwrap_err(),
            UrlNormalizationError::Empty
        ));
        assert!(matches!(
            normalize_url("   ").unwrap_err(),
            UrlNormalizationError::Empty
        ));
    }

    #[test]
    fn test_normalize_rejects_other_protocols() {
        for input in [
            "ftp://example.com/file.txt",
            "file:///home/user/document.txt",
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "mailto:test@example.com",
        ] {
            assert!(
                matches!(
                    normalize_url(input).unwrap_err(),
                    UrlNormalizationError::UnsupportedProtocol
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_ip_address() {
        let result = normalize_url("http://192.168.1.1:8080/api");
        assert_eq!(result.unwrap(), "http://192.168.1.1:8080/api");
    }

    #[test]
    fn test_normalize_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            normalize_url(&url).unwrap_err(),
            UrlNormalizationError::TooLong
        ));
    }

    #[test]
    fn test_normalize_at_length_limit() {
        let prefix = "https://example.com/";
        let url = format!("{prefix}{}", "a".repeat(MAX_URL_LENGTH - prefix.len()));
        assert_eq!(normalize_url(&url).unwrap().len(), MAX_URL_LENGTH);
    }

    #[test]
    fn test_normalize_encoded_characters() {
        let result = normalize_url("https://example.com/path%20with%20spaces");
        assert!(result.unwrap().contains("path%20with%20spaces"));
    }
}
