//! EU Commissioner meeting-link scraper.
//!
//! Crawls the [College of Commissioners](https://commission.europa.eu/about/organisation/college-commissioners_en)
//! directory page, follows each commissioner's profile page, and collects the
//! transparency-register meeting links published there.
//!
//! # URL Patterns
//!
//! Commissioner profiles are linked with relative hrefs containing
//! `/about/organisation/college-commissioners/`, resolved against the
//! Commission origin. Meeting links are absolute URLs into
//! `ec.europa.eu/transparencyinitiative/meetings/meeting.do?host=...`.

use crate::fetch::PageSource;
use crate::models::MeetingLinkRecord;
use crate::utils::upcase;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use scraper::{Html, Selector};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Origin used to resolve relative profile hrefs.
pub const BASE_URL: &str = "https://commission.europa.eu";

/// Directory page listing all commissioners.
pub const DIRECTORY_URL: &str =
    "https://commission.europa.eu/about/organisation/college-commissioners_en";

/// Substring identifying commissioner profile hrefs on the directory page.
const COMMISSIONER_PATTERN: &str = "/about/organisation/college-commissioners/";

/// Substring identifying transparency-register meeting hrefs on profile pages.
const MEETING_PATTERN: &str =
    "https://ec.europa.eu/transparencyinitiative/meetings/meeting.do?host=";

/// Pause between profile page requests.
const REQUEST_PACING: Duration = Duration::from_secs(1);

/// Extract commissioner profile URLs from the directory page HTML.
///
/// Keeps every `a[href]` whose href contains the profile path pattern,
/// resolves it against [`BASE_URL`], and deduplicates by exact string
/// equality preserving first-seen order.
pub fn extract_commissioner_links(html: &str) -> Vec<String> {
    let base = match Url::parse(BASE_URL) {
        Ok(base) => base,
        Err(e) => {
            error!(error = %e, "Invalid base URL");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.contains(COMMISSIONER_PATTERN))
        .filter_map(|href| base.join(href).ok())
        .map(|resolved| resolved.to_string())
        .unique()
        .collect()
}

/// Extract transparency-register meeting links from a profile page HTML.
///
/// Meeting hrefs are already absolute, so they are kept verbatim,
/// deduplicated preserving first-seen order.
pub fn extract_meeting_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.contains(MEETING_PATTERN))
        .map(|href| href.to_string())
        .unique()
        .collect()
}

/// Derive a display name from a commissioner profile URL.
///
/// Takes the last path segment, replaces hyphens with spaces, and
/// capitalizes each word. Returns `"Unknown"` when the URL has no
/// usable path segment.
pub fn commissioner_name(commissioner_url: &str) -> String {
    let segment = Url::parse(commissioner_url).ok().and_then(|url| {
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
    });

    match segment {
        Some(segment) if !segment.is_empty() => segment
            .split('-')
            .map(upcase)
            .collect::<Vec<_>>()
            .join(" "),
        _ => "Unknown".to_string(),
    }
}

/// Crawl the directory and every commissioner profile, collecting all
/// meeting links.
///
/// Requests are strictly sequential with a fixed [`REQUEST_PACING`] pause
/// between profile pages. Profile pages that fail to fetch are logged and
/// skipped. Returns an empty vec when the directory page itself is
/// unreachable or lists no commissioners.
#[instrument(level = "info", skip_all)]
pub async fn collect_meeting_links<S: PageSource>(source: &S) -> Vec<MeetingLinkRecord> {
    info!(url = DIRECTORY_URL, "Fetching commissioner directory");
    let commissioner_links = match source.fetch(DIRECTORY_URL).await {
        Ok(html) => extract_commissioner_links(&html),
        Err(e) => {
            error!(error = %e, url = DIRECTORY_URL, "Directory fetch failed");
            return Vec::new();
        }
    };

    if commissioner_links.is_empty() {
        error!("No commissioner links found");
        return Vec::new();
    }
    info!(count = commissioner_links.len(), "Found commissioner links");

    let total = commissioner_links.len();
    let records: Vec<Vec<MeetingLinkRecord>> = stream::iter(commissioner_links.into_iter().enumerate())
        .then(|(i, commissioner_url)| async move {
            info!(index = i + 1, total, url = %commissioner_url, "Processing commissioner");

            let meeting_links = match source.fetch(&commissioner_url).await {
                Ok(html) => extract_meeting_links(&html),
                Err(e) => {
                    warn!(error = %e, url = %commissioner_url, "Profile fetch failed; skipping");
                    Vec::new()
                }
            };
            debug!(count = meeting_links.len(), url = %commissioner_url, "Meeting links on page");

            let name = commissioner_name(&commissioner_url);
            let records = meeting_links
                .into_iter()
                .map(|meeting_link| MeetingLinkRecord {
                    commissioner_name: name.clone(),
                    commissioner_url: commissioner_url.clone(),
                    meeting_link,
                })
                .collect::<Vec<_>>();

            tokio::time::sleep(REQUEST_PACING).await;
            records
        })
        .collect()
        .await;

    let all: Vec<MeetingLinkRecord> = records.into_iter().flatten().collect();
    info!(count = all.len(), "Total meeting links found");
    all
}
