//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the HTTP client with the configured user agent
//! - The single GET for the page being scraped
//! - Streamed downloads of images and documents to disk
//!
//! Nothing here retries. A failed request is a final outcome for that URL.

use crate::config::FetchConfig;
use crate::url::file_name_from_url;
use reqwest::{Client, Response, StatusCode};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Timeout used by [`fetch`] when no configuration is involved
pub const DEFAULT_RESOURCE_TIMEOUT: Duration = Duration::from_secs(15);

/// Why a resource download failed
///
/// The display form is the line recorded in the report next to the resource
/// URL, e.g. `Failed to download https://example.com/a.png: HTTP status 404 Not Found`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    #[error("Failed to download {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    /// The server answered with a non-2xx status
    #[error("Failed to download {url}: HTTP status {status}")]
    Status { url: String, status: StatusCode },

    /// The response could not be written to disk
    #[error("Failed to download {url}: could not write {}: {source}", .path.display())]
    Write {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FetchError {
    /// The URL whose download failed
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. } | Self::Status { url, .. } | Self::Write { url, .. } => url,
        }
    }

    /// Returns true if the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http { source, .. } if source.is_timeout())
    }
}

/// Outcome of a resource download: the local path, or why it failed
pub type FetchResult = Result<PathBuf, FetchError>;

/// A successfully fetched page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: url::Url,

    /// HTTP status code
    pub status_code: u16,

    /// Decoded page body
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// Request timeouts are applied per request (page and resources differ), so
/// only the connect timeout is set on the client.
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::FetchConfig;
/// use page_harvest::scrape::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the page to be scraped
///
/// Redirects are followed. Any transport error or non-2xx status is an error;
/// the caller turns it into the minimal failure report.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL
/// * `timeout` - Total time allowed for the request and body
pub async fn fetch_page(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<FetchedPage, reqwest::Error> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;

    let status_code = response.status().as_u16();
    let final_url = response.url().clone();
    let body = response.text().await?;

    tracing::debug!(
        "Fetched {} ({} bytes, status {})",
        final_url,
        body.len(),
        status_code
    );

    Ok(FetchedPage {
        final_url,
        status_code,
        body,
    })
}

/// Downloads `url` into `dest_folder`, naming the file after the URL
///
/// The file name is the last path segment of the URL, or `file` when there is
/// none. An existing file of that name is overwritten.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: reqwest::Client) {
/// use page_harvest::scrape::fetch;
/// use std::path::Path;
///
/// match fetch(&client, "https://example.com/logo.png", Path::new("images")).await {
///     Ok(path) => println!("saved {}", path.display()),
///     Err(e) => println!("{}", e),
/// }
/// # }
/// ```
pub async fn fetch(client: &Client, url: &str, dest_folder: &Path) -> FetchResult {
    let dest = dest_folder.join(file_name_from_url(url));
    fetch_resource(client, url, &dest, DEFAULT_RESOURCE_TIMEOUT).await
}

/// Downloads `url` to the file at `dest`, streaming the body chunk by chunk
///
/// The body goes to a hidden `.part` file next to `dest`, which is renamed over
/// `dest` once the transfer completes. A failed request leaves `dest` exactly
/// as it was; only the partial file is removed.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - Absolute URL of the resource
/// * `dest` - Target file path (its folder must exist)
/// * `timeout` - Total time allowed for the request and body
///
/// # Returns
///
/// The local path on success, or a [`FetchError`] naming the URL and cause
pub async fn fetch_resource(
    client: &Client,
    url: &str,
    dest: &Path,
    timeout: Duration,
) -> FetchResult {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let part = part_path(dest);
    let written = match stream_to_file(response, url, &part).await {
        Ok(()) => tokio::fs::rename(&part, dest)
            .await
            .map_err(|source| FetchError::Write {
                url: url.to_string(),
                path: dest.to_path_buf(),
                source,
            }),
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&part).await {
            tracing::debug!(
                "Could not remove partial file {}: {}",
                part.display(),
                cleanup
            );
        }
        return Err(e);
    }

    tracing::debug!("Saved {} to {}", url, dest.display());
    Ok(dest.to_path_buf())
}

/// Picks a unique sibling path for an in-progress download of `dest`
fn part_path(dest: &Path) -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);

    let name = dest
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = NEXT.fetch_add(1, Ordering::Relaxed);

    dest.with_file_name(format!(".{}.{}-{}.part", name, std::process::id(), id))
}

/// Writes the response body to `path` as it arrives
async fn stream_to_file(mut response: Response, url: &str, path: &Path) -> Result<(), FetchError> {
    let write_error = |source: std::io::Error| FetchError::Write {
        url: url.to_string(),
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::create(path).await.map_err(write_error)?;

    while let Some(chunk) = response.chunk().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk).await.map_err(write_error)?;
    }

    file.flush().await.map_err(write_error)?;
    Ok(())
}
