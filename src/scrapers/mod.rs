//! Scrapers for the two EU transparency pipelines.
//!
//! Each scraper follows the same two-phase pattern:
//!
//! 1. **Fetching**: download page HTML through a [`PageSource`](crate::fetch::PageSource)
//! 2. **Extraction**: pure functions that turn HTML text into records
//!
//! # Pipelines
//!
//! | Pipeline | Module | Source pages | Output |
//! |----------|--------|--------------|--------|
//! | Meeting links | [`commissioners`] | College of Commissioners directory + profile pages | CSV |
//! | Meetings feed | [`meetings`] | Transparency-initiative per-host meeting tables | RSS + HTML |
//!
//! Extraction is kept free of I/O so the same code runs against fixture HTML
//! in tests. Failed fetches are logged and skipped; a run never aborts because
//! one page was unreachable or structurally off.

pub mod commissioners;
pub mod meetings;
