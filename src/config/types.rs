use serde::Deserialize;

/// Main configuration structure for page-harvest
///
/// Every section and key is optional; missing values fall back to the
/// defaults below, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub download: DownloadConfig,
    pub output: OutputConfig,
}

/// HTTP behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Timeout for the initial page request (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Timeout for each image or document download (seconds)
    #[serde(rename = "resource-timeout-secs")]
    pub resource_timeout_secs: u64,

    /// Timeout for establishing a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 30,
            resource_timeout_secs: 15,
            connect_timeout_secs: 10,
            user_agent: format!("page-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// What to do when two resources map to the same local file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append a counter before the extension (`logo-1.png`)
    #[default]
    Rename,
    /// Last write in document order wins (needs `concurrency = 1`)
    Overwrite,
}

/// Resource download configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Maximum number of simultaneous downloads (1 = strictly sequential)
    pub concurrency: usize,

    /// File name collision handling inside `images/` and `downloads/`
    #[serde(rename = "on-collision")]
    pub on_collision: CollisionPolicy,

    /// Link suffixes treated as downloadable documents (matched case-insensitively)
    #[serde(rename = "document-extensions")]
    pub document_extensions: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            on_collision: CollisionPolicy::Rename,
            document_extensions: [".pdf", ".doc", ".docx", ".xls", ".xlsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which `run_<timestamp>` folders are created
    pub root: String,

    /// Print the startup banner
    pub banner: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            banner: true,
        }
    }
}
