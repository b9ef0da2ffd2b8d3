//! Scrape module for single page harvesting
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching of the page and streamed resource downloads
//! - HTML parsing and content extraction
//! - Visible text extraction
//! - Overall run coordination

mod fetcher;
mod parser;
mod runner;
mod visible_text;

pub use fetcher::{
    build_http_client, fetch, fetch_page, fetch_resource, FetchError, FetchResult, FetchedPage,
    DEFAULT_RESOURCE_TIMEOUT,
};
pub use parser::{parse_html, MetaTag, ParsedPage, HEADING_LEVELS};
pub use runner::{harvest, scrape, Harvest};
pub use visible_text::{visible_text_lines, HIDDEN_ELEMENTS};
