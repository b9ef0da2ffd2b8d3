//! Run directory and resource folder management
//!
//! Each invocation writes into `run_<YYYYMMDD-HHMMSS>`. Downloaded images and
//! documents go into per-kind subfolders whose file names are handed out by
//! [`ResourceDir`].

use crate::config::CollisionPolicy;
use crate::url::file_name_from_url;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Subfolder for downloaded images
pub const IMAGES_DIR: &str = "images";

/// Subfolder for downloaded documents
pub const DOWNLOADS_DIR: &str = "downloads";

/// Formats the run directory name for a point in time
///
/// # Examples
///
/// ```
/// use chrono::{Local, TimeZone};
/// use page_harvest::output::run_dir_name;
///
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
/// assert_eq!(run_dir_name(&at), "run_20240309-070501");
/// ```
pub fn run_dir_name(at: &DateTime<Local>) -> String {
    format!("run_{}", at.format("%Y%m%d-%H%M%S"))
}

/// Creates the run directory for the current local time under `root`
///
/// Two runs started within the same second share a directory.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the (possibly pre-existing) run directory
/// * `Err(std::io::Error)` - Failed to create the directory
pub fn create_run_dir(root: &Path) -> std::io::Result<PathBuf> {
    let dir = root.join(run_dir_name(&Local::now()));
    std::fs::create_dir_all(&dir)?;
    tracing::debug!("Created run directory {}", dir.display());
    Ok(dir)
}

/// A download folder that assigns local file names to resource URLs
///
/// Names are derived from the last URL path segment. Under
/// [`CollisionPolicy::Rename`] a name already handed out in this run, or
/// already present on disk, gets a numeric suffix before its extension.
#[derive(Debug)]
pub struct ResourceDir {
    path: PathBuf,
    policy: CollisionPolicy,
    taken: HashSet<String>,
}

impl ResourceDir {
    /// Creates the folder (and any missing parents)
    pub fn create(path: PathBuf, policy: CollisionPolicy) -> std::io::Result<Self> {
        std::fs::create_dir_all(&path)?;
        Ok(Self {
            path,
            policy,
            taken: HashSet::new(),
        })
    }

    /// The folder's path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reserves a local path for `url`
    ///
    /// Reservations must be made in document order; the n-th duplicate of a
    /// name always receives the same suffix regardless of download timing.
    pub fn reserve(&mut self, url: &str) -> PathBuf {
        let name = file_name_from_url(url);

        if self.policy == CollisionPolicy::Overwrite {
            return self.path.join(name);
        }

        let mut candidate = name.clone();
        let mut counter = 0;
        while self.taken.contains(&candidate) || self.path.join(&candidate).exists() {
            counter += 1;
            candidate = with_counter(&name, counter);
        }

        self.taken.insert(candidate.clone());
        self.path.join(candidate)
    }
}

/// Inserts `-<n>` before the extension: `logo.png` becomes `logo-1.png`
fn with_counter(name: &str, n: u32) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => format!("{}-{}{}", &name[..idx], n, &name[idx..]),
        _ => format!("{}-{}", name, n),
    }
}
