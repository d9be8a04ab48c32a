//! Link discovery
//!
//! Enumerates `<a href>` targets on a rendered page and keeps the ones a crawl
//! may follow from it.

use crate::url::same_host;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Discovers followable links on a page
///
/// # Rules
///
/// - Anchors are resolved against `<base href>` when present, else the page URL
/// - Only `http` and `https` targets are kept
/// - The target host must equal the host of `page_url` (the page being
///   crawled, not the seed), so scoping follows the crawl across redirects
/// - Duplicates are removed by exact URL string, keeping document order
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use site_snapshot::extract::discover_links;
/// use url::Url;
///
/// let html = Html::parse_document(r#"<a href="/a">A</a><a href="https://other.test/">B</a>"#);
/// let page = Url::parse("https://example.test/").unwrap();
/// assert_eq!(discover_links(&html, &page), vec!["https://example.test/a".to_string()]);
/// ```
pub fn discover_links(document: &Html, page_url: &Url) -> Vec<String> {
    let base = document_base(document, page_url);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(target) = resolve_link(href, &base) else {
            continue;
        };

        if !same_host(page_url, &target) {
            tracing::trace!("Skipping off-host link {} on {}", target, page_url);
            continue;
        }

        let target = String::from(target);
        if seen.insert(target.clone()) {
            links.push(target);
        }
    }

    links
}

/// Returns the URL anchors resolve against
fn document_base(document: &Html, page_url: &Url) -> Url {
    Selector::parse("base[href]")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Resolves an href to an absolute http(s) URL
///
/// Returns None for empty hrefs, unparseable targets and any other scheme
/// (`javascript:`, `mailto:`, `tel:`, `data:` and so on).
pub(crate) fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute = base.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        discover_links(&Html::parse_document(html), &page_url())
    }

    #[test]
    fn test_relative_links_resolved() {
        let html = r#"<a href="/other">1</a><a href="sibling">2</a>"#;
        assert_eq!(
            links(html),
            vec![
                "https://example.com/other".to_string(),
                "https://example.com/sibling".to_string()
            ]
        );
    }

    #[test]
    fn test_off_host_links_dropped() {
        let html = r#"
            <a href="https://other.com/page">other</a>
            <a href="https://sub.example.com/page">subdomain</a>
            <a href="http://example.com/plain">plain http</a>
        "#;
        assert_eq!(links(html), vec!["http://example.com/plain".to_string()]);
    }

    #[test]
    fn test_scoping_uses_page_host_not_seed() {
        let html = Html::parse_document(r#"<a href="/x">x</a><a href="https://example.com/y">y</a>"#);
        let page = Url::parse("https://docs.example.com/start").unwrap();
        assert_eq!(
            discover_links(&html, &page),
            vec!["https://docs.example.com/x".to_string()]
        );
    }

    #[test]
    fn test_non_http_schemes_dropped() {
        let html = r#"
            <a href="javascript:void(0)">js</a>
            <a href="mailto:test@example.com">mail</a>
            <a href="tel:+1234567890">tel</a>
            <a href="data:text/html,hi">data</a>
            <a href="ftp://example.com/file">ftp</a>
            <a href="">empty</a>
        "#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_duplicates_removed_in_document_order() {
        let html = r#"
            <a href="/b">b</a>
            <a href="/a">a</a>
            <a href="https://example.com/b">b again</a>
            <a href="/a#frag">a with fragment</a>
        "#;
        assert_eq!(
            links(html),
            vec![
                "https://example.com/b".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/a#frag".to_string(),
            ]
        );
    }

    #[test]
    fn test_base_href_honored() {
        let html = r#"<html><head><base href="/docs/"></head><body><a href="intro">i</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/docs/intro".to_string()]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        assert!(links(r#"<a name="top">top</a>"#).is_empty());
    }

    #[test]
    fn test_resolve_link() {
        let base = page_url();
        assert_eq!(
            resolve_link("  /x  ", &base).map(String::from),
            Some("https://example.com/x".to_string())
        );
        assert!(resolve_link("mailto:a@b.c", &base).is_none());
    }
}
