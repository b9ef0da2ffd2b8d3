//! Configuration module for page-harvest
//!
//! Configuration is optional. Without a file every setting takes its default
//! (30s page timeout, 15s resource timeout, sequential downloads).
//!
//! # Example
//!
//! ```no_run
//! use page_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Downloads run {} at a time", config.download.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CollisionPolicy, Config, DownloadConfig, FetchConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{validate, MAX_CONCURRENCY};
