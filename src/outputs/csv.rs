//! CSV export for discovered meeting links.
//!
//! The column schema is fixed by [`MeetingLinkRecord`]'s field order:
//! `commissioner_name,commissioner_url,meeting_link`, UTF-8, header row
//! first, one row per record in current list order.

use crate::models::MeetingLinkRecord;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Serialize records to CSV bytes, header row included.
pub fn render_meeting_links(records: &[MeetingLinkRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Write records to a CSV file at `path`.
///
/// Warns and writes nothing when the record list is empty.
#[instrument(level = "info", skip_all, fields(%path, count = records.len()))]
pub async fn write_meeting_links(
    records: &[MeetingLinkRecord],
    path: &str,
) -> Result<(), Box<dyn Error>> {
    if records.is_empty() {
        warn!("No meeting links to export");
        return Ok(());
    }

    let bytes = render_meeting_links(records)?;
    fs::write(path, bytes).await?;
    info!("Exported meeting links");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<MeetingLinkRecord> {
        vec![
            MeetingLinkRecord {
                commissioner_name: "Jane Doe".to_string(),
                commissioner_url: "https://commission.europa.eu/x/jane-doe".to_string(),
                meeting_link:
                    "https://ec.europa.eu/transparencyinitiative/meetings/meeting.do?host=aaa"
                        .to_string(),
            },
            MeetingLinkRecord {
                commissioner_name: "John Smith".to_string(),
                commissioner_url: "https://commission.europa.eu/x/john-smith".to_string(),
                meeting_link:
                    "https://ec.europa.eu/transparencyinitiative/meetings/meeting.do?host=bbb"
                        .to_string(),
            },
        ]
    }

    #[test]
    fn test_render_includes_header_and_rows() {
        let out = String::from_utf8(render_meeting_links(&sample_records()).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "commissioner_name,commissioner_url,meeting_link");
        assert!(lines[1].starts_with("Jane Doe,"));
        assert!(lines[2].starts_with("John Smith,"));
    }

    #[test]
    fn test_csv_round_trip() {
        let records = sample_records();
        let bytes = render_meeting_links(&records).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let read_back: Vec<MeetingLinkRecord> = reader
            .records()
            .map(|row| {
                let row = row.unwrap();
                MeetingLinkRecord {
                    commissioner_name: row[0].to_string(),
                    commissioner_url: row[1].to_string(),
                    meeting_link: row[2].to_string(),
                }
            })
            .collect();
        assert_eq!(read_back, records);
    }

    #[tokio::test]
    async fn test_write_skips_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.csv");
        let path_str = path.to_str().unwrap();

        write_meeting_links(&[], path_str).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.csv");
        let path_str = path.to_str().unwrap();

        write_meeting_links(&sample_records(), path_str).await.unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Jane Doe"));
    }
}
