//! page-harvest: a one-shot web page harvester
//!
//! This crate fetches a single page, extracts its metadata, headings, links,
//! images and visible text, downloads linked images and documents, and writes
//! a plain-text report into a timestamped run directory.

pub mod config;
pub mod output;
pub mod scrape;
pub mod url;

use thiserror::Error;

/// Main error type for page-harvest operations
///
/// Remote failures (the page fetch, individual downloads) are recorded in the
/// report instead of surfacing here. These variants cover the local
/// environment: configuration, the output directory and the HTTP client setup.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for page-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{create_run_dir, render_report, PageReport, ScrapeSummary};
pub use scrape::{fetch, harvest, scrape, FetchError, FetchResult, Harvest, ParsedPage};
