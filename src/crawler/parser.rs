//! HTML extractor for titles, readable text and links
//!
//! This module turns fetched markup into the pieces a page record needs:
//! - Page title (falling back to the page URL)
//! - Flattened text of paragraph, heading and list-item elements
//! - Outbound links resolved to absolute URLs
//!
//! Extraction never fails. html5ever recovers from malformed markup, and
//! anything missing degrades to a fallback instead of an error.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text makes up the page body, matched in document order
const TEXT_SELECTOR: &str = "p, h1, h2, h3, li";

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// The page title, never empty
    pub title: String,

    /// Newline-joined text of the selected elements
    pub text: String,

    /// All anchor targets, resolved against the page URL
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts title, text and links
///
/// # Text Rules
///
/// - Every `p`, `h1`, `h2`, `h3` and `li` element contributes its full
///   descendant text, trimmed, on its own line
/// - Elements that are empty or whitespace-only contribute nothing
/// - Nested matches (a `p` inside an `li`) each contribute a line
///
/// # Link Rules
///
/// - Every `<a href>` is resolved with standard URL joining, so relative
///   paths, protocol-relative and fragment-only hrefs become absolute URLs
/// - Hrefs that cannot be resolved are skipped
/// - No filtering by scheme or origin happens here
///
/// # Example
///
/// ```
/// use site_corpus::crawler::extract;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Hi</p><a href="/page">Link</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let page = extract(html, &page_url);
/// assert_eq!(page.title, "Test");
/// assert_eq!(page.text, "Hi");
/// assert_eq!(page.links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract(html: &str, page_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| page_url.to_string());
    let text = extract_text(&document);
    let links = extract_links(&document, page_url);

    ExtractedPage { title, text, links }
}

/// Extracts the trimmed text of the first `<title>` element, if non-empty
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|s| !s.is_empty())
}

/// Joins the trimmed text of every body element, one per line
fn extract_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse(TEXT_SELECTOR) else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolves all anchor hrefs against the page URL
fn extract_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| match page_url.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::trace!("Skipping malformed href {:?} on {}: {}", href, page_url, e);
                None
            }
        })
        .collect()
}
