//! # EU Minutes
//!
//! Scrapes EU Commission transparency data through two independent pipelines:
//!
//! - **links**: crawls the College of Commissioners directory, follows each
//!   commissioner's profile page, and exports every transparency-register
//!   meeting link found there as CSV
//! - **feed**: fetches the per-Directorate-General meetings pages, parses
//!   their tables, sorts the rows by meeting date (newest first), and
//!   publishes an RSS 2.0 feed plus a static HTML index page
//!
//! ## Usage
//!
//! ```sh
//! eu_minutes links
//! eu_minutes feed --output-dir docs
//! ```
//!
//! ## Architecture
//!
//! Both pipelines follow the same shape: Fetch → Parse → Transform → Export.
//! Fetching is strictly sequential (one request in flight at a time) and
//! failures never abort a run; output files are written only after the full
//! in-memory collection completes.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod feed;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, Command};
use fetch::{HttpSource, RetrySource};
use utils::ensure_writable_dir;

/// Retry attempts for the commissioner crawl.
const LINKS_MAX_RETRIES: usize = 3;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("eu_minutes starting up");

    let args = Cli::parse();

    let result = match args.command {
        Command::Links { output } => run_links(&output).await,
        Command::Feed { output_dir } => run_feed(&output_dir).await,
    };

    if let Err(ref e) = result {
        error!(error = %e, "Run failed");
        eprintln!("Error: {}", e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    result
}

/// Run the commissioner meeting-links pipeline and export CSV.
#[instrument(level = "info", skip_all, fields(%output))]
async fn run_links(output: &str) -> Result<(), Box<dyn Error>> {
    info!("Starting EU Commissioner meeting links scraping");

    let source = RetrySource::new(HttpSource::new()?, LINKS_MAX_RETRIES, Duration::from_secs(1));
    let records = scrapers::commissioners::collect_meeting_links(&source).await;

    if records.is_empty() {
        println!("No meeting links found!");
        return Ok(());
    }

    outputs::csv::write_meeting_links(&records, output).await?;

    println!("\n=== SCRAPING SUMMARY ===");
    println!("Total meeting links found: {}", records.len());
    println!("Data exported to: {}", output);
    println!("\nFirst few meeting links:");
    for (i, record) in records.iter().take(5).enumerate() {
        println!(
            "{}. {}: {}",
            i + 1,
            record.commissioner_name,
            record.meeting_link
        );
    }

    Ok(())
}

/// Run the DG meetings pipeline and publish the feed plus index page.
#[instrument(level = "info", skip_all, fields(%output_dir))]
async fn run_feed(output_dir: &str) -> Result<(), Box<dyn Error>> {
    ensure_writable_dir(output_dir).await?;

    let source = HttpSource::new()?;
    let records = scrapers::meetings::collect_meeting_records(&source).await;
    let record_count = records.len();

    let items = feed::build_feed_items(records);

    let feed_path = format!(
        "{}/{}",
        output_dir.trim_end_matches('/'),
        outputs::html::FEED_FILENAME
    );
    outputs::rss::write_feed(&items, &feed_path).await?;
    println!("RSS feed created: {}", feed_path);

    outputs::html::write_index_page(output_dir).await?;

    info!(
        records = record_count,
        pages = scrapers::meetings::HOST_IDS.len(),
        "Feed and index page created"
    );
    Ok(())
}
