use url::Url;

/// File name used when a URL has no final path segment
pub const DEFAULT_FILE_NAME: &str = "file";

/// Derives the local file name for a downloaded resource
///
/// The name is the last segment of the URL path, kept exactly as it appears
/// in the URL (no percent-decoding). Query strings and fragments are ignored.
/// URLs ending in `/`, URLs without a path and unparseable URLs all map to
/// [`DEFAULT_FILE_NAME`].
///
/// # Examples
///
/// ```
/// use page_harvest::url::file_name_from_url;
///
/// assert_eq!(file_name_from_url("https://example.com/img/logo.png?v=2"), "logo.png");
/// assert_eq!(file_name_from_url("https://example.com/img/"), "file");
/// assert_eq!(file_name_from_url("https://example.com"), "file");
/// ```
pub fn file_name_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return DEFAULT_FILE_NAME.to_string();
    };

    match parsed.path().rsplit('/').next() {
        Some(segment) if !segment.is_empty() && segment != "." && segment != ".." => {
            segment.to_string()
        }
        _ => DEFAULT_FILE_NAME.to_string(),
    }
}

/// Returns true if the raw href names a downloadable document
///
/// Matching is a case-insensitive suffix comparison on the href as written in
/// the page, so `report.PDF` matches `.pdf` but `report.pdf?dl=1` does not.
/// `extensions` are expected in lowercase.
pub fn is_document_link(href: &str, extensions: &[String]) -> bool {
    let href = href.to_lowercase();
    extensions.iter().any(|ext| href.ends_with(ext.as_str()))
}
