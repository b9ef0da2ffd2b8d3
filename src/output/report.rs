//! Plain-text report generation
//!
//! This module renders a [`PageReport`] into the text written to `info.txt`.
//! Rendering is pure; [`write_report`] is the only function touching disk.

use crate::scrape::{FetchResult, ParsedPage, HEADING_LEVELS};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Name of the report file inside a run directory
pub const REPORT_FILE_NAME: &str = "info.txt";

/// Width of the rule printed above the visible text section
const RULE_WIDTH: usize = 30;

/// A downloaded resource paired with the outcome of its download
#[derive(Debug)]
pub struct ResourceEntry {
    /// Absolute URL of the resource
    pub url: String,

    /// Local path on success, the failure otherwise
    pub result: FetchResult,
}

impl ResourceEntry {
    /// Returns true if the resource was saved to disk
    pub fn is_saved(&self) -> bool {
        self.result.is_ok()
    }

    fn outcome(&self) -> String {
        match &self.result {
            Ok(path) => path.display().to_string(),
            Err(e) => e.to_string(),
        }
    }
}

/// Everything found on one successfully fetched page
#[derive(Debug)]
pub struct PageReport {
    /// The URL as entered by the user
    pub url: String,

    /// HTTP status code of the page response
    pub status_code: u16,

    /// Extracted page content
    pub page: ParsedPage,

    /// Image downloads, in document order
    pub images: Vec<ResourceEntry>,

    /// Document downloads, in document order
    pub documents: Vec<ResourceEntry>,
}

/// Writes the report text to `<run_dir>/info.txt`, replacing any existing file
///
/// # Arguments
///
/// * `run_dir` - The run directory
/// * `contents` - Rendered report text
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(std::io::Error)` - Failed to create or write the file
pub fn write_report(run_dir: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(run_dir.join(REPORT_FILE_NAME))?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Formats the minimal report written when the page itself could not be fetched
pub fn render_fetch_failure(url: &str, error: &str) -> String {
    format!("Failed to fetch URL: {}\nError: {}", url, error)
}

/// Formats a page report as text
///
/// Sections appear in a fixed order: header, meta tags, title, headings h1 to
/// h6, links, images, file downloads and visible text. Optional sections are
/// omitted entirely when empty; the title line is always present.
///
/// # Arguments
///
/// * `report` - The page report
///
/// # Returns
///
/// The report text, lines separated by `\n`
pub fn render_report(report: &PageReport) -> String {
    let page = &report.page;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "URL: {}\nStatus code: {}\n",
        report.url, report.status_code
    ));

    if !page.meta.is_empty() {
        lines.push("Meta tags:".to_string());
        for tag in &page.meta {
            lines.push(format!("  - {}: {}", tag.label, tag.content));
        }
        lines.push(String::new());
    }

    lines.push(format!("Title: {}\n", page.title));

    for (level, headings) in HEADING_LEVELS.iter().zip(&page.headings) {
        if headings.is_empty() {
            continue;
        }
        lines.push(format!("{} tags:", level.to_uppercase()));
        lines.extend(headings.iter().map(|text| format!("  - {}", text)));
        lines.push(String::new());
    }

    if !page.links.is_empty() {
        lines.push(format!("Links ({}):", page.links.len()));
        lines.extend(page.links.iter().map(|link| format!("  - {}", link)));
        lines.push(String::new());
    }

    push_resources(&mut lines, "Images", &report.images);
    push_resources(&mut lines, "File downloads", &report.documents);

    lines.push(format!("\n{}", "=".repeat(RULE_WIDTH)));
    lines.push(format!("VISIBLE TEXT ({} lines):\n", page.text_lines.len()));
    lines.extend(page.text_lines.iter().cloned());
    lines.push("\n--- END ---\n".to_string());

    lines.join("\n")
}

fn push_resources(lines: &mut Vec<String>, heading: &str, entries: &[ResourceEntry]) {
    if entries.is_empty() {
        return;
    }

    lines.push(format!("{} ({}):", heading, entries.len()));
    for entry in entries {
        lines.push(format!("  - {}  -->  {}", entry.url, entry.outcome()));
    }
    lines.push(String::new());
}
