//! Output generation modules for CSV, RSS, and the static HTML index.
//!
//! # Submodules
//!
//! - [`csv`]: Writes discovered meeting links as a CSV file
//! - [`rss`]: Serializes sorted feed items to an RSS 2.0 document
//! - [`html`]: Writes a static index page linking to the feed
//!
//! # Output Structure
//!
//! ```text
//! eu_commissioner_meeting_links.csv   # links pipeline
//!
//! docs/
//! ├── feed.xml                        # feed pipeline
//! └── index.html
//! ```
//!
//! Rendering is split from file writing so tests can inspect the serialized
//! bytes without touching the filesystem. Files are only written once the
//! full in-memory collection is complete.

pub mod csv;
pub mod html;
pub mod rss;
