use url::Url;

/// Extracts the host from a URL
///
/// The parser already lowercases domain names; IP addresses are returned in
/// their canonical textual form. Returns `None` for URLs without a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_snapshot::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs carry the same host
///
/// Ports and schemes are not compared, matching how a page's hostname is
/// compared against its anchors.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
