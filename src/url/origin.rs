use url::Url;

/// Derives the origin (scheme, host and non-default port) of a URL
///
/// The host is already lowercased by the URL parser, and default ports are
/// omitted, so `https://Example.COM:443/a` and `https://example.com/b` share
/// the origin `https://example.com`.
///
/// Returns `None` for URLs with an opaque origin (`mailto:`, `data:`,
/// `javascript:` and friends), which can never be crawled.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_corpus::url::origin_of;
///
/// let url = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(origin_of(&url), Some("https://example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(origin_of(&url), Some("http://127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(origin_of(&url), None);
/// ```
pub fn origin_of(url: &Url) -> Option<String> {
    let origin = url.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

/// Returns true if `link` lives on exactly the given origin
///
/// The comparison is made on parsed origins rather than on string prefixes,
/// so `https://example.com.evil.net/` is not considered part of
/// `https://example.com`.
pub fn is_same_origin(link: &Url, origin: &str) -> bool {
    origin_of(link).is_some_and(|o| o == origin)
}
