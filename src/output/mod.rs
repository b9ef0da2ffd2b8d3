//! Output module for run directories and reports
//!
//! This module handles:
//! - Creating the timestamped run directory and its resource folders
//! - Rendering and writing the `info.txt` report
//! - Summarising a run for the console

mod report;
mod run_dir;
pub mod stats;

pub use report::{
    render_fetch_failure, render_report, write_report, PageReport, ResourceEntry,
    REPORT_FILE_NAME,
};
pub use run_dir::{create_run_dir, run_dir_name, ResourceDir, DOWNLOADS_DIR, IMAGES_DIR};
pub use stats::{print_summary, ScrapeSummary};
