//! URL helpers for page-harvest
//!
//! This module resolves hrefs against the page URL, derives local file names
//! for downloaded resources and recognises document links.

mod resolve;
mod resource;

// Re-export main functions
pub use resolve::resolve_href;
pub use resource::{file_name_from_url, is_document_link, DEFAULT_FILE_NAME};
