//! HTML parser for extracting page content
//!
//! This module turns an HTML document into a [`ParsedPage`]:
//! - Meta tags, title and headings
//! - Links, image sources and document links (absolute URLs)
//! - Visible text lines
//!
//! Parsing is lenient: malformed markup never produces an error. All lists
//! keep document order and duplicates.

use crate::scrape::visible_text::visible_text_lines;
use crate::url::{is_document_link, resolve_href};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Heading tags, in the order they appear in the report
pub const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// A single `<meta>` tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTag {
    /// `name`, else `property`, else empty
    pub label: String,

    /// `content`, or empty when absent
    pub content: String,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Every `<meta>` tag in document order
    pub meta: Vec<MetaTag>,

    /// Trimmed text of the first `<title>`, empty if there is none
    pub title: String,

    /// Heading texts per level; index 0 is `h1`
    pub headings: [Vec<String>; 6],

    /// Every `<a href>`, resolved against the page URL
    pub links: Vec<String>,

    /// Every `<img src>`, resolved against the page URL
    pub images: Vec<String>,

    /// Links whose raw href ends with a document extension, resolved
    pub documents: Vec<String>,

    /// Non-empty, trimmed lines of visible text
    pub text_lines: Vec<String>,
}

/// Parses HTML content and extracts everything the report needs
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
/// * `document_extensions` - Lowercase suffixes that mark document links
///
/// # Example
///
/// ```
/// use page_harvest::scrape::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/a.pdf">Doc</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, &[".pdf".to_string()]);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.documents, vec!["https://example.com/a.pdf"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, document_extensions: &[String]) -> ParsedPage {
    let document = Html::parse_document(html);

    let (links, documents) = extract_links(&document, base_url, document_extensions);

    ParsedPage {
        meta: extract_meta(&document),
        title: extract_title(&document),
        headings: extract_headings(&document),
        links,
        images: extract_images(&document, base_url),
        documents,
        text_lines: visible_text_lines(&document),
    }
}

/// Extracts every meta tag with its resolved label
fn extract_meta(document: &Html) -> Vec<MetaTag> {
    let Ok(selector) = Selector::parse("meta") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| {
            let attrs = element.value();
            MetaTag {
                label: attrs
                    .attr("name")
                    .or_else(|| attrs.attr("property"))
                    .unwrap_or_default()
                    .to_string(),
                content: attrs.attr("content").unwrap_or_default().to_string(),
            }
        })
        .collect()
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Collects heading texts for h1 through h6
fn extract_headings(document: &Html) -> [Vec<String>; 6] {
    let mut headings: [Vec<String>; 6] = Default::default();

    for (level, texts) in HEADING_LEVELS.iter().zip(headings.iter_mut()) {
        if let Ok(selector) = Selector::parse(level) {
            *texts = document.select(&selector).map(plain_text).collect();
        }
    }

    headings
}

/// Flattens an element to one line, collapsing every whitespace run to a space
fn plain_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts all anchors, returning (links, document links)
fn extract_links(
    document: &Html,
    base_url: &Url,
    document_extensions: &[String],
) -> (Vec<String>, Vec<String>) {
    let mut links = Vec::new();
    let mut documents = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return (links, documents);
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            let absolute = resolve_href(base_url, href);
            if is_document_link(href, document_extensions) {
                documents.push(absolute.clone());
            }
            links.push(absolute);
        }
    }

    (links, documents)
}

/// Extracts every image source
fn extract_images(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .map(|src| resolve_href(base_url, src))
        .collect()
}
