//! Command-line interface definitions.
//!
//! The binary exposes the two scraping pipelines as subcommands. The source
//! URLs and host identifiers are fixed in the scraper modules; only the
//! output locations are configurable.

use clap::{Parser, Subcommand};

/// Command-line arguments for the EU minutes scraper.
///
/// # Examples
///
/// ```sh
/// # Crawl commissioner pages and export the meeting-link CSV
/// eu_minutes links
///
/// # Scrape the DG meetings tables and publish the RSS feed + index page
/// eu_minutes feed --output-dir docs
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Which pipeline to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect transparency-register meeting links from commissioner pages
    /// and export them as CSV
    Links {
        /// Output CSV path
        #[arg(short, long, default_value = "eu_commissioner_meeting_links.csv")]
        output: String,
    },
    /// Scrape all DG meetings tables and write the RSS feed and index page
    Feed {
        /// Directory for feed.xml and index.html
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_defaults() {
        let cli = Cli::parse_from(&["eu_minutes", "links"]);
        match cli.command {
            Command::Links { output } => {
                assert_eq!(output, "eu_commissioner_meeting_links.csv");
            }
            _ => panic!("expected links subcommand"),
        }
    }

    #[test]
    fn test_feed_output_dir_flag() {
        let cli = Cli::parse_from(&["eu_minutes", "feed", "--output-dir", "/tmp/site"]);
        match cli.command {
            Command::Feed { output_dir } => {
                assert_eq!(output_dir, "/tmp/site");
            }
            _ => panic!("expected feed subcommand"),
        }
    }
}
