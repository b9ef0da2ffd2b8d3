//! Visible text extraction
//!
//! Walks the parsed document without modifying it, skipping the subtrees of
//! non-content elements. Each text node contributes its lines, trimmed; empty
//! lines are dropped, so every tag boundary acts as a line break.

use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Elements whose content never counts as visible text
pub const HIDDEN_ELEMENTS: [&str; 6] = ["script", "style", "nav", "footer", "header", "noscript"];

/// Returns the visible text of a document as non-empty, trimmed lines
///
/// # Example
///
/// ```
/// use page_harvest::scrape::visible_text_lines;
/// use scraper::Html;
///
/// let html = Html::parse_document("<body><nav>Menu</nav><p>Hello <b>there</b></p></body>");
/// assert_eq!(visible_text_lines(&html), vec!["Hello", "there"]);
/// ```
pub fn visible_text_lines(document: &Html) -> Vec<String> {
    let mut lines = Vec::new();
    collect_lines(document.root_element(), &mut lines);
    lines
}

fn collect_lines(element: ElementRef, lines: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                lines.extend(
                    text.lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string),
                );
            }
            Node::Element(el) if is_hidden(el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_lines(child_el, lines);
                }
            }
            _ => {}
        }
    }
}

fn is_hidden(name: &str) -> bool {
    HIDDEN_ELEMENTS.contains(&name)
}
