//! Per-run statistics
//!
//! A [`ScrapeSummary`] condenses a run into counts for the final console
//! output. The report file remains the complete record.

use crate::output::report::{PageReport, ResourceEntry};

/// Outcome counts for a single scrape run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Whether the initial page request failed (only a minimal report exists)
    pub page_failed: bool,

    /// HTTP status code of the page, when it was fetched
    pub status_code: Option<u16>,

    /// Number of `<meta>` tags
    pub meta_tags: usize,

    /// Total headings across all levels
    pub headings: usize,

    /// Number of links (duplicates included)
    pub links: usize,

    /// Images referenced / saved
    pub images_found: usize,
    pub images_saved: usize,

    /// Documents referenced / saved
    pub documents_found: usize,
    pub documents_saved: usize,

    /// Lines of visible text
    pub text_lines: usize,
}

impl ScrapeSummary {
    /// Summary for a run whose page request failed
    pub fn page_failed() -> Self {
        Self {
            page_failed: true,
            ..Self::default()
        }
    }

    /// Builds a summary from a completed report
    pub fn from_report(report: &PageReport) -> Self {
        let page = &report.page;
        Self {
            page_failed: false,
            status_code: Some(report.status_code),
            meta_tags: page.meta.len(),
            headings: page.headings.iter().map(Vec::len).sum(),
            links: page.links.len(),
            images_found: report.images.len(),
            images_saved: count_saved(&report.images),
            documents_found: report.documents.len(),
            documents_saved: count_saved(&report.documents),
            text_lines: page.text_lines.len(),
        }
    }

    /// Number of resource downloads that failed
    pub fn failed_downloads(&self) -> usize {
        (self.images_found - self.images_saved) + (self.documents_found - self.documents_saved)
    }
}

fn count_saved(entries: &[ResourceEntry]) -> usize {
    entries.iter().filter(|entry| entry.is_saved()).count()
}

/// Prints the summary to stdout
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &ScrapeSummary) {
    if summary.page_failed {
        println!("The page could not be fetched; see info.txt for the error.");
        return;
    }

    println!("Summary:");
    if let Some(code) = summary.status_code {
        println!("  Status code: {}", code);
    }
    println!("  Meta tags: {}", summary.meta_tags);
    println!("  Headings: {}", summary.headings);
    println!("  Links: {}", summary.links);
    println!(
        "  Images: {} saved / {} found",
        summary.images_saved, summary.images_found
    );
    println!(
        "  Documents: {} saved / {} found",
        summary.documents_saved, summary.documents_found
    );
    println!("  Visible text lines: {}", summary.text_lines);
}
