//! Scrape runner - single page orchestration
//!
//! This module drives one scrape from start to finish:
//! - Fetching the page (a failure here ends the run with a minimal report)
//! - Parsing and extracting content
//! - Downloading images and documents in document order
//! - Rendering and writing `info.txt`

use crate::config::{validate, Config};
use crate::output::{
    create_run_dir, render_fetch_failure, render_report, write_report, PageReport,
    ResourceDir, ResourceEntry, ScrapeSummary, DOWNLOADS_DIR, IMAGES_DIR,
};
use crate::scrape::fetcher::{build_http_client, fetch_page, fetch_resource};
use crate::scrape::parser::parse_html;
use crate::HarvestError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Result of a complete harvest: where it was written and what was found
#[derive(Debug)]
pub struct Harvest {
    /// The run directory holding `info.txt` and downloaded resources
    pub run_dir: PathBuf,

    /// Counts for console output
    pub summary: ScrapeSummary,
}

/// Runs a complete harvest of `url`
///
/// This is the main entry point. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Create a fresh `run_<timestamp>` directory under `config.output.root`
/// 4. Scrape the page into it
///
/// # Returns
///
/// * `Ok(Harvest)` - The run completed; remote failures are described in the report
/// * `Err(HarvestError)` - A local failure (config, client or file system)
pub async fn harvest(url: &str, config: &Config) -> Result<Harvest, HarvestError> {
    validate(config)?;

    let client = build_http_client(&config.fetch)?;
    let run_dir = create_run_dir(Path::new(&config.output.root))?;

    tracing::info!("Writing results to {}", run_dir.display());

    let summary = scrape(&client, config, url, &run_dir).await?;

    Ok(Harvest { run_dir, summary })
}

/// Scrapes one page into an existing output directory
///
/// Only local I/O failures are returned as errors. A failed page fetch writes
/// the two-line failure report and returns a summary with `page_failed` set;
/// failed resource downloads are recorded inline in the report.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Timeouts, download and extension settings
/// * `url` - The page URL as entered
/// * `out_dir` - Existing directory receiving `info.txt`, `images/` and `downloads/`
pub async fn scrape(
    client: &Client,
    config: &Config,
    url: &str,
    out_dir: &Path,
) -> Result<ScrapeSummary, HarvestError> {
    let page_timeout = Duration::from_secs(config.fetch.page_timeout_secs);

    let fetched = match fetch_page(client, url, page_timeout).await {
        Ok(fetched) => fetched,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            write_report(out_dir, &render_fetch_failure(url, &e.to_string()))?;
            return Ok(ScrapeSummary::page_failed());
        }
    };

    // Relative references resolve against the URL as entered
    let base_url = Url::parse(url).unwrap_or_else(|_| fetched.final_url.clone());
    let page = parse_html(
        &fetched.body,
        &base_url,
        &config.download.document_extensions,
    );

    tracing::info!(
        "Found {} links, {} images, {} documents",
        page.links.len(),
        page.images.len(),
        page.documents.len()
    );

    let images = download_all(client, config, &page.images, out_dir.join(IMAGES_DIR)).await?;
    let documents =
        download_all(client, config, &page.documents, out_dir.join(DOWNLOADS_DIR)).await?;

    let report = PageReport {
        url: url.to_string(),
        status_code: fetched.status_code,
        page,
        images,
        documents,
    };

    write_report(out_dir, &render_report(&report))?;

    Ok(ScrapeSummary::from_report(&report))
}

/// Downloads every URL into `folder`, returning entries in input order
///
/// The folder is created only when there is something to download. File names
/// are reserved up front so they do not depend on completion order.
async fn download_all(
    client: &Client,
    config: &Config,
    urls: &[String],
    folder: PathBuf,
) -> Result<Vec<ResourceEntry>, HarvestError> {
    if urls.is_empty() {
        return Ok(Vec::new());
    }

    let mut dir = ResourceDir::create(folder, config.download.on_collision)?;
    let targets: Vec<(String, PathBuf)> = urls
        .iter()
        .map(|url| (url.clone(), dir.reserve(url)))
        .collect();

    let timeout = Duration::from_secs(config.fetch.resource_timeout_secs);
    let concurrency = config.download.concurrency;

    tracing::info!(
        "Downloading {} resources into {}",
        targets.len(),
        dir.path().display()
    );

    let entries = if concurrency <= 1 {
        download_sequential(client, targets, timeout).await
    } else {
        download_pooled(client, targets, timeout, concurrency).await
    };

    Ok(entries)
}

async fn download_sequential(
    client: &Client,
    targets: Vec<(String, PathBuf)>,
    timeout: Duration,
) -> Vec<ResourceEntry> {
    let mut entries = Vec::with_capacity(targets.len());

    for (url, dest) in targets {
        let result = fetch_resource(client, &url, &dest, timeout).await;
        log_outcome(&url, &result);
        entries.push(ResourceEntry { url, result });
    }

    entries
}

/// Runs downloads on a bounded pool and restores document order afterwards
async fn download_pooled(
    client: &Client,
    targets: Vec<(String, PathBuf)>,
    timeout: Duration,
    concurrency: usize,
) -> Vec<ResourceEntry> {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for (index, (url, dest)) in targets.into_iter().enumerate() {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let result = fetch_resource(&client, &url, &dest, timeout).await;
            (index, ResourceEntry { url, result })
        });
    }

    let mut indexed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, entry)) => {
                log_outcome(&entry.url, &entry.result);
                indexed.push((index, entry));
            }
            Err(e) => tracing::error!("Download task failed: {}", e),
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, entry)| entry).collect()
}

fn log_outcome(url: &str, result: &crate::scrape::FetchResult) {
    match result {
        Ok(path) => tracing::debug!("Downloaded {} -> {}", url, path.display()),
        Err(e) if e.is_timeout() => tracing::warn!("Timed out: {}", e),
        Err(e) => tracing::warn!("{}", e),
    }
}
