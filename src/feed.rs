//! Feed item derivation: date parsing, sorting and stable identifiers.
//!
//! Meeting dates arrive as `DD/MM/YYYY` text in the table's `Date` column.
//! Anything unparseable falls back to the Unix epoch sentinel so every record
//! still participates in the total order; the cost is conflating "no date"
//! with "very old", which for a newest-first feed just pushes those records
//! to the end.

use crate::models::MeetingRecord;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

/// Column holding the meeting date.
pub const DATE_FIELD: &str = "Date";

/// A meeting record ready for feed serialization.
#[derive(Debug, Clone)]
pub struct FeedItem {
    /// The underlying table record.
    pub record: MeetingRecord,
    /// Parsed meeting date at midnight, or the epoch sentinel.
    pub published: NaiveDateTime,
    /// Content hash of the record's canonical form, stable across runs.
    pub guid: String,
}

/// The fallback timestamp for missing or malformed dates.
pub fn sentinel_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Parse the record's `Date` field (`DD/MM/YYYY`) into a datetime at
/// midnight. Any failure — missing field, wrong shape, non-numeric parts,
/// out-of-range values — yields [`sentinel_date`], logged at warn.
pub fn parse_meeting_date(record: &MeetingRecord) -> NaiveDateTime {
    let Some(raw) = record.get(DATE_FIELD).filter(|s| !s.is_empty()) else {
        return sentinel_date();
    };

    match parse_dmy(raw) {
        Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_else(sentinel_date),
        None => {
            warn!(date = raw, "Could not parse date; using epoch start instead");
            sentinel_date()
        }
    }
}

fn parse_dmy(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Derive feed items from records and sort them newest-first.
///
/// The sort is stable: records sharing a date keep their original relative
/// order, and all sentinel-dated records end up after every real-dated one.
pub fn build_feed_items(records: Vec<MeetingRecord>) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = records
        .into_iter()
        .map(|record| {
            let published = parse_meeting_date(&record);
            let guid = blake3::hash(record.canonical_string().as_bytes())
                .to_hex()
                .to_string();
            FeedItem {
                record,
                published,
                guid,
            }
        })
        .collect();

    items.sort_by(|a, b| b.published.cmp(&a.published));
    info!(count = items.len(), "Sorted items by date (newest first)");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_date(date: &str, subject: &str) -> MeetingRecord {
        MeetingRecord {
            fields: vec![
                (DATE_FIELD.to_string(), date.to_string()),
                ("Subject matter".to_string(), subject.to_string()),
            ],
            source_url: "https://example.eu/m".to_string(),
            directorate: "DG Test".to_string(),
        }
    }

    #[test]
    fn test_parse_valid_date() {
        let record = record_with_date("01/02/2024", "x");
        assert_eq!(
            parse_meeting_date(&record),
            NaiveDate::from_ymd_opt(2024, 2, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_empty_and_malformed_dates_fall_back_to_sentinel() {
        assert_eq!(
            parse_meeting_date(&record_with_date("", "x")),
            sentinel_date()
        );
        assert_eq!(
            parse_meeting_date(&record_with_date("bad", "x")),
            sentinel_date()
        );
        assert_eq!(
            parse_meeting_date(&record_with_date("31/02/2024", "x")),
            sentinel_date()
        );
        assert_eq!(
            parse_meeting_date(&record_with_date("1/2/2024/9", "x")),
            sentinel_date()
        );
    }

    #[test]
    fn test_missing_date_field_falls_back_to_sentinel() {
        let record = MeetingRecord {
            fields: vec![("Subject matter".to_string(), "x".to_string())],
            source_url: "https://example.eu/m".to_string(),
            directorate: "DG Test".to_string(),
        };
        assert_eq!(parse_meeting_date(&record), sentinel_date());
    }

    #[test]
    fn test_sort_is_descending_with_sentinels_last() {
        let items = build_feed_items(vec![
            record_with_date("bad", "undated-1"),
            record_with_date("15/01/2024", "older"),
            record_with_date("01/02/2024", "newer"),
            record_with_date("", "undated-2"),
        ]);

        let subjects: Vec<&str> = items
            .iter()
            .map(|i| i.record.get("Subject matter").unwrap())
            .collect();
        assert_eq!(subjects, vec!["newer", "older", "undated-1", "undated-2"]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let items = build_feed_items(vec![
            record_with_date("01/02/2024", "first"),
            record_with_date("01/02/2024", "second"),
        ]);
        assert_eq!(items[0].record.get("Subject matter"), Some("first"));
        assert_eq!(items[1].record.get("Subject matter"), Some("second"));
    }

    #[test]
    fn test_guid_is_stable_for_identical_records() {
        let a = build_feed_items(vec![record_with_date("01/02/2024", "x")]);
        let b = build_feed_items(vec![record_with_date("01/02/2024", "x")]);
        assert_eq!(a[0].guid, b[0].guid);
        assert_eq!(a[0].guid.len(), 64);
    }

    #[test]
    fn test_guid_differs_between_records() {
        let items = build_feed_items(vec![
            record_with_date("01/02/2024", "x"),
            record_with_date("01/02/2024", "y"),
        ]);
        assert_ne!(items[0].guid, items[1].guid);
    }
}
