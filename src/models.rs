//! Data models for the two scraping pipelines.
//!
//! - [`MeetingLinkRecord`]: one discovered transparency-register meeting link,
//!   tied to the commissioner page it was found on (CSV pipeline)
//! - [`MeetingRecord`]: one row of a meetings table, with the column set the
//!   page's header row defines plus the injected source URL and directorate
//!   label (RSS pipeline)
//!
//! A meetings table's column set varies between pages but is consistent within
//! one page, so `MeetingRecord` keeps its fields as ordered pairs rather than
//! a fixed struct. The column order doubles as the canonical ordering for the
//! feed item content hash.

use serde::Serialize;

/// A single meeting link discovered on a commissioner profile page.
///
/// Field order matches the CSV column order:
/// `commissioner_name,commissioner_url,meeting_link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingLinkRecord {
    /// Display name derived from the commissioner URL's last path segment.
    pub commissioner_name: String,
    /// Absolute URL of the commissioner profile page.
    pub commissioner_url: String,
    /// The transparency-register meeting link found on that page.
    pub meeting_link: String,
}

/// One data row of a meetings table.
///
/// `fields` holds `(column header, cell text)` pairs in table column order.
/// The header row of the source page defines the schema, so the pair list
/// length always equals that page's header count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRecord {
    /// Column values keyed by header text, in table column order.
    pub fields: Vec<(String, String)>,
    /// URL of the page the row was scraped from.
    pub source_url: String,
    /// Organizational unit whose meetings the page lists.
    pub directorate: String,
}

impl MeetingRecord {
    /// Look up a cell value by its column header.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Canonical textual form of the record: fields in table column order,
    /// then the directorate, then the source URL. Feed item guids hash this
    /// string, so the ordering here is what keeps them stable across runs.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        for (k, v) in &self.fields {
            out.push_str(k);
            out.push_str(": ");
            out.push_str(v);
            out.push('\n');
        }
        out.push_str("Directorate: ");
        out.push_str(&self.directorate);
        out.push('\n');
        out.push_str("source_url: ");
        out.push_str(&self.source_url);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MeetingRecord {
        MeetingRecord {
            fields: vec![
                ("Date".to_string(), "01/02/2024".to_string()),
                ("Subject matter".to_string(), "Energy policy".to_string()),
            ],
            source_url: "https://example.eu/meetings".to_string(),
            directorate: "DG Energy".to_string(),
        }
    }

    #[test]
    fn test_get_returns_cell_by_header() {
        let record = sample_record();
        assert_eq!(record.get("Date"), Some("01/02/2024"));
        assert_eq!(record.get("Subject matter"), Some("Energy policy"));
        assert_eq!(record.get("Attendees"), None);
    }

    #[test]
    fn test_canonical_string_preserves_column_order() {
        let record = sample_record();
        let canonical = record.canonical_string();
        let date_pos = canonical.find("Date:").unwrap();
        let subject_pos = canonical.find("Subject matter:").unwrap();
        let directorate_pos = canonical.find("Directorate:").unwrap();
        let source_pos = canonical.find("source_url:").unwrap();
        assert!(date_pos < subject_pos);
        assert!(subject_pos < directorate_pos);
        assert!(directorate_pos < source_pos);
    }

    #[test]
    fn test_canonical_string_is_deterministic() {
        let a = sample_record().canonical_string();
        let b = sample_record().canonical_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_meeting_link_record_csv_field_order() {
        let record = MeetingLinkRecord {
            commissioner_name: "Jane Doe".to_string(),
            commissioner_url: "https://commission.europa.eu/x/jane-doe".to_string(),
            meeting_link: "https://ec.europa.eu/transparencyinitiative/meetings/meeting.do?host=abc"
                .to_string(),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&record).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.starts_with("commissioner_name,commissioner_url,meeting_link\n"));
    }
}
