use crate::UrlError;
use url::Url;

/// Parses a seed URL supplied by the caller
///
/// Seeds go through the same serialization as discovered links, so that a
/// seed written as `https://example.com` and a link resolved to
/// `https://example.com/` are one and the same URL in the visited set.
///
/// # Arguments
///
/// * `seed` - The seed URL string, surrounding whitespace is ignored
///
/// # Returns
///
/// * `Ok(Url)` - Parsed HTTP(S) URL with a host
/// * `Err(UrlError)` - Malformed URL, unsupported scheme, or missing host
///
/// # Examples
///
/// ```
/// use site_corpus::url::parse_seed;
///
/// let url = parse_seed("https://example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// assert!(parse_seed("ftp://example.com/").is_err());
/// ```
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
