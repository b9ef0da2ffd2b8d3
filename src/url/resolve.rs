use url::Url;

/// Resolves an `href` or `src` attribute against the page URL
///
/// Unlike a crawler's link filter this keeps every value: `mailto:`,
/// `javascript:` and fragment-only references are reported as written on the
/// page. A value that cannot be joined to the base (for example a broken IPv6
/// literal) is returned unchanged.
///
/// # Arguments
///
/// * `base` - The URL the page was requested from
/// * `href` - The raw attribute value
///
/// # Examples
///
/// ```
/// use page_harvest::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/index.html").unwrap();
/// assert_eq!(resolve_href(&base, "guide.pdf"), "https://example.com/docs/guide.pdf");
/// assert_eq!(resolve_href(&base, "/logo.png"), "https://example.com/logo.png");
/// ```
pub fn resolve_href(base: &Url, href: &str) -> String {
    match base.join(href) {
        Ok(absolute) => absolute.to_string(),
        Err(e) => {
            tracing::debug!("Could not resolve '{}' against {}: {}", href, base, e);
            href.to_string()
        }
    }
}
