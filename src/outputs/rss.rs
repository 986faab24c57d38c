//! RSS 2.0 serialization for the meetings feed.
//!
//! The feed is written with `quick_xml` writer events. Per item:
//! - title: the record's `Subject matter` column, falling back to the
//!   directorate label
//! - link: the source meetings page
//! - description: every field except `source_url` as `<strong>key:</strong>
//!   value` pairs joined with `<br>` (escaped as text, like any feed
//!   generator would)
//! - guid: content hash of the record's canonical form, `isPermaLink="false"`
//! - pubDate: the parsed meeting date in RFC 2822 form

use crate::feed::FeedItem;
use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Channel metadata for the published feed.
pub const FEED_TITLE: &str = "Table Data RSS Feed";
pub const FEED_DESCRIPTION: &str =
    "RSS feed generated from all the available DG minutes websites";
pub const FEED_LINK: &str = "https://followthemoney.github.io/eu_minutes_rss/feed.xml";
pub const FEED_LANGUAGE: &str = "en";

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn item_title(item: &FeedItem) -> String {
    match item.record.get("Subject matter") {
        Some(subject) if !subject.is_empty() => subject.to_string(),
        _ => item.record.directorate.clone(),
    }
}

fn item_description(item: &FeedItem) -> String {
    let mut parts: Vec<String> = item
        .record
        .fields
        .iter()
        .map(|(k, v)| format!("<strong>{}:</strong> {}", k, v.trim()))
        .collect();
    parts.push(format!(
        "<strong>Directorate:</strong> {}",
        item.record.directorate.trim()
    ));
    parts.join("<br>")
}

/// Serialize sorted feed items to an RSS 2.0 document.
pub fn render_feed(items: &[FeedItem]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss_start))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;
    write_text_element(&mut writer, "title", FEED_TITLE)?;
    write_text_element(&mut writer, "link", FEED_LINK)?;
    write_text_element(&mut writer, "description", FEED_DESCRIPTION)?;
    write_text_element(&mut writer, "language", FEED_LANGUAGE)?;

    for item in items {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &item_title(item))?;
        write_text_element(&mut writer, "link", &item.record.source_url)?;
        write_text_element(&mut writer, "description", &item_description(item))?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        writer.write_event(Event::Start(guid))?;
        writer.write_event(Event::Text(BytesText::new(&item.guid)))?;
        writer.write_event(Event::End(BytesEnd::new("guid")))?;

        let pub_date = Utc.from_utc_datetime(&item.published).to_rfc2822();
        write_text_element(&mut writer, "pubDate", &pub_date)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(writer.into_inner())
}

/// Write the feed document to `path`.
#[instrument(level = "info", skip_all, fields(%path, count = items.len()))]
pub async fn write_feed(items: &[FeedItem], path: &str) -> Result<(), Box<dyn Error>> {
    let bytes = render_feed(items)?;
    fs::write(path, bytes).await?;
    info!("RSS feed created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::build_feed_items;
    use crate::models::MeetingRecord;

    fn sample_items() -> Vec<FeedItem> {
        build_feed_items(vec![
            MeetingRecord {
                fields: vec![
                    ("Date".to_string(), "15/01/2024".to_string()),
                    ("Subject matter".to_string(), "Grid expansion".to_string()),
                ],
                source_url: "https://example.eu/m?host=a".to_string(),
                directorate: "DG Energy".to_string(),
            },
            MeetingRecord {
                fields: vec![
                    ("Date".to_string(), "01/02/2024".to_string()),
                    ("Subject matter".to_string(), "Hydrogen strategy".to_string()),
                ],
                source_url: "https://example.eu/m?host=b".to_string(),
                directorate: "DG Energy".to_string(),
            },
        ])
    }

    #[test]
    fn test_feed_has_channel_metadata() {
        let xml = String::from_utf8(render_feed(&sample_items()).unwrap()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<title>Table Data RSS Feed</title>"));
        assert!(xml.contains("<language>en</language>"));
    }

    #[test]
    fn test_items_are_newest_first() {
        let xml = String::from_utf8(render_feed(&sample_items()).unwrap()).unwrap();
        let hydrogen = xml.find("Hydrogen strategy").unwrap();
        let grid = xml.find("Grid expansion").unwrap();
        assert!(hydrogen < grid);
    }

    #[test]
    fn test_item_fields() {
        let items = sample_items();
        let xml = String::from_utf8(render_feed(&items).unwrap()).unwrap();
        assert!(xml.contains("<link>https://example.eu/m?host=b</link>"));
        assert!(xml.contains("Thu, 1 Feb 2024 00:00:00 +0000"));
        assert!(xml.contains(&format!("isPermaLink=\"false\">{}</guid>", items[0].guid)));
        // Description markup is escaped text, with source_url excluded.
        assert!(xml.contains("&lt;strong&gt;Date:&lt;/strong&gt; 01/02/2024"));
        assert!(xml.contains("&lt;strong&gt;Directorate:&lt;/strong&gt; DG Energy"));
        assert!(!xml.contains("&lt;strong&gt;source_url"));
    }

    #[test]
    fn test_title_falls_back_to_directorate() {
        let items = build_feed_items(vec![MeetingRecord {
            fields: vec![("Date".to_string(), "01/02/2024".to_string())],
            source_url: "https://example.eu/m".to_string(),
            directorate: "DG Trade".to_string(),
        }]);
        let xml = String::from_utf8(render_feed(&items).unwrap()).unwrap();
        assert!(xml.contains("<title>DG Trade</title>"));
    }

    #[test]
    fn test_empty_feed_is_still_valid_channel() {
        let xml = String::from_utf8(render_feed(&[]).unwrap()).unwrap();
        assert!(xml.contains("</channel>"));
        assert!(!xml.contains("<item>"));
    }
}
