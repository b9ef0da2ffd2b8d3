//! page-harvest main entry point
//!
//! This is the command-line interface for the page-harvest single page scraper.

use anyhow::Context;
use clap::Parser;
use page_harvest::config::load_config_or_default;
use page_harvest::harvest;
use page_harvest::output::print_summary;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// page-harvest: fetch one page and keep everything on it
///
/// Downloads a single web page, records its metadata, headings, links and
/// visible text in `info.txt`, and saves linked images and documents next to
/// it in a timestamped `run_<YYYYMMDD-HHMMSS>` folder.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version)]
#[command(about = "Fetch one web page and save its content and resources", long_about = None)]
struct Cli {
    /// Page to scrape; prompted for on stdin when omitted
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory in which the run folder is created (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    output_root: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    if let Some(root) = &cli.output_root {
        config.output.root = root.display().to_string();
    }

    if config.output.banner && !cli.no_banner {
        print_banner();
    }

    let url = match cli.url {
        Some(url) => url.trim().to_string(),
        None => prompt_for_url().context("Failed to read URL from stdin")?,
    };

    if url.is_empty() {
        println!("You must enter a URL.");
        return Ok(());
    }

    println!("Scraping {} ...", url);

    match harvest(&url, &config).await {
        Ok(result) => {
            tracing::info!(
                "Scrape finished ({} failed downloads)",
                result.summary.failed_downloads()
            );
            println!(
                "\nAll results, including info, links, metadata, images (and files) are saved in: {}",
                result.run_dir.display()
            );
            print_summary(&result.summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,info"),
            2 => EnvFilter::new("page_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the startup greeting
fn print_banner() {
    let banner = r"
  ___  __ _  __ _  ___       | |__   __ _ _ ____   _____  ___| |_
 | _ \/ _` |/ _` |/ _ \ ___  | '_ \ / _` | '__\ \ / / _ \/ __| __|
 |  _/ (_| | (_| |  __/|___| | | | | (_| | |   \ V /  __/\__ \ |_
 |_|  \__,_|\__, |\___|      |_| |_|\__,_|_|    \_/ \___||___/\__|
            |___/
        One page in, everything on it out. Paste a URL to begin.
";
    println!("{}", banner);
}

/// Asks for the target URL on stdin and returns it trimmed
fn prompt_for_url() -> std::io::Result<String> {
    print!("Paste the target URL: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
