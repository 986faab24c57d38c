//! Static HTML index page for the published feed.
//!
//! GitHub Pages serves this next to `feed.xml`. The page advertises the feed
//! via a `<link rel="alternate">` tag and a visible hyperlink, and carries a
//! last-updated timestamp.

use chrono::Local;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Filename of the feed document the page links to.
pub const FEED_FILENAME: &str = "feed.xml";

/// Render the index page with the given last-updated timestamp string.
pub fn render_index_page(last_updated: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>EU minutes RSS Feed</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="alternate" type="application/rss+xml" title="EU minutes RSS Feed" href="{feed}" />
</head>
<body>
    <h1>Table Data RSS Feed</h1>
    <p>This page hosts an RSS feed generated from all the available DG minutes websites.</p>
    <p>Last updated: {last_updated}</p>
    <p><a href="{feed}">Subscribe to the RSS Feed</a></p>
</body>
</html>"#,
        feed = FEED_FILENAME,
        last_updated = last_updated,
    )
}

/// Write `index.html` into `output_dir` with the current local time as the
/// last-updated stamp.
#[instrument(level = "info", skip_all, fields(%output_dir))]
pub async fn write_index_page(output_dir: &str) -> Result<(), Box<dyn Error>> {
    let last_updated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let page = render_index_page(&last_updated);
    let path = format!("{}/index.html", output_dir.trim_end_matches('/'));
    fs::write(&path, page).await?;
    info!(path = %path, "Wrote feed index page");
    Ok(())
}
