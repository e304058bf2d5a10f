//! Offline URL canonicalization.
//!
//! Produces one stable spelling per target so that equivalent inputs reuse the
//! same alias. Nothing here touches the network.

use url::{ParseError, Url};

/// Errors that can occur while canonicalizing a target.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Canonicalizes a target URL.
///
/// # Rules
///
/// 1. **Missing scheme**: input without a scheme, including `host:port`, is
///    retried as `http://<input>`
/// 2. **Protocol**: only HTTP and HTTPS are accepted
/// 3. **Hostname**: lowercased
/// 4. **Default ports**: removed (80 for HTTP, 443 for HTTPS)
/// 5. **Fragments**: removed
/// 6. **Path and query**: preserved as-is
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs and
/// [`UrlNormalizationError::UnsupportedProtocol`] for other schemes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com/a").unwrap(), "http://example.com/a");
/// assert_eq!(
///     normalize_url("HTTPS://EXAMPLE.COM:443/Path#top").unwrap(),
///     "https://example.com/Path"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();

    let mut url = match Url::parse(trimmed) {
        Ok(url) if !is_host_with_port(&url) => url,
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{trimmed}"))
                .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?
        }
        Err(e) => return Err(UrlNormalizationError::InvalidFormat(e.to_string())),
    };

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    if let Some(host) = url.host_str().map(str::to_ascii_lowercase) {
        url.set_host(Some(&host))
            .map_err(|e| UrlNormalizationError::NormalizationFailed(e.to_string()))?;
    }

    url.set_fragment(None);

    if matches!((url.scheme(), url.port()), ("http", Some(80)) | ("https", Some(443))) {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}

/// `host:port/...` parses as an opaque URL whose scheme is the host.
fn is_host_with_port(url: &Url) -> bool {
    url.cannot_be_a_base() && url.path().starts_with(|c: char| c.is_ascii_digit())
}
