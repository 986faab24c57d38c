//! Transparency-initiative meetings table scraper.
//!
//! Each Directorate-General publishes its meetings with interest
//! representatives on a per-host page at
//! `ec.europa.eu/transparencyinitiative/meetings/meeting.do?host=<id>`.
//! The page carries one table (`#listMeetingsTable`) whose header row defines
//! the column set for that page, and an `h3` heading naming the organizational
//! unit.
//!
//! Parsing is positional: data row cells are zipped against the header cells,
//! and rows whose cell count differs from the header count are skipped.

use crate::fetch::PageSource;
use crate::models::MeetingRecord;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

/// Known meeting-page host identifiers, one per Directorate-General.
pub const HOST_IDS: &[&str] = &[
    "cfe4759a-94d7-4925-b721-be0694aeaeee",
    "a8793855-8d00-4dbe-8df4-5a368e3aa86e",
    "0fbdad0a-4342-4091-b766-91b393b97617",
    "5f4689e0-014c-4bec-8125-f9e6d3592c86",
    "8d411331-1f9c-49ad-bf3f-54c9723c5496",
    "394df231-6f63-43a1-ac2f-a5c6c2aea0b7",
    "9c8a817a-8b63-494f-b8aa-7f1d9a3d4aa7",
    "836198d9-3839-4b03-861c-7d7b2dc923bf",
    "19a6da2c-5659-48c1-b351-b8014dd4d54d",
    "c9dd58ff-4f2e-4e64-83c0-0ef45573239d",
    "ed82401c-d412-44bd-bdbc-3d0c5d051337",
    "4a2b905b-d91f-421a-870a-3f9387018669",
    "24e12322-567f-4305-8a81-46e4261aca02",
    "0bdcfdaf-b25f-4fa4-9843-6d8aff622df9",
    "09ed44d4-9995-496b-b508-61f84006ff93",
    "b7f75e74-dd34-4911-8942-3b84e241424d",
    "30674a4b-0bbe-4243-9500-704f334ced64",
    "df6d8307-5772-45fb-a234-be95f3186c1f",
    "19bd5d17-a3ef-4a2b-899c-28126a38b0c2",
    "66b9a93e-bac3-4820-8f21-9576b54e3428",
    "35e322b6-e216-42e2-9b87-b21c41ac0d2a",
    "fd8d5cd6-d490-4257-af03-d5fbb0abca14",
    "5f6cf615-e3f3-495a-846a-9ccc191e86fc",
    "33bb1312-1e91-47f1-afeb-d4d1313630d6",
    "357c8eea-da5c-49bc-9d63-a5c1b76c770e",
    "3bb86a7d-035a-4a39-8226-c46622754eb2",
    "1451b45a-b39b-48ee-a50a-00a440ef2f09",
    "b85b3c8d-483b-4e3d-b066-160c467e2884",
    "e1df1b18-cb0f-47e6-bd6b-9643b9eb5c5c",
    "ca175ad3-c2c5-457e-8f6d-f17956bdcc4e",
    "e780754a-50f5-41fe-b42f-8ffe6165ad35",
    "61569260-525e-42f8-aa52-51d7bfc30d4f",
    "6c877f62-58d1-4645-aa27-bbbc7b872de3",
    "9bd9f7c0-836e-4ff6-abf4-a1f8650861cb",
    "e2ac53f7-cf9c-4aa7-a7fd-06a355c8b361",
    "06fb3b80-76a8-43f1-b1a5-e703cfe8d625",
    "3c3c8b28-6aa7-4b6b-b3d1-c06e22e002b4",
    "ffdb1b81-84a9-4ce1-8974-164aa26ce7e8",
    "aae7124c-b839-4139-9ffe-ad5660fe9404",
    "2aac00d9-fbaf-425f-af65-c697a37d51bb",
    "e5538979-4674-413c-9912-75853e91bdc5",
    "1eefac79-31f7-41ef-b1f0-3d1270ce33a9",
    "d41e42be-7ff1-4635-bb4f-e47d38f886ed",
];

/// Heading prefixes stripped when deriving the directorate label.
const HEADING_PREFIX: &str = "Meetings held by the ";
const HEADING_SUFFIX: &str = " with interest representatives";

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#listMeetingsTable").unwrap());
static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());

/// Build the meetings page URL for a host identifier.
pub fn meeting_page_url(host_id: &str) -> String {
    format!(
        "https://ec.europa.eu/transparencyinitiative/meetings/meeting.do?host={}",
        host_id
    )
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse a meetings page into records.
///
/// Returns `None` when the page has no `#listMeetingsTable` element, and
/// `Some(vec![])` when the table exists but carries no rows beyond the
/// header. Every record is annotated with `source_url` and the directorate
/// label derived from the page heading.
pub fn parse_meetings_page(html: &str, source_url: &str) -> Option<Vec<MeetingRecord>> {
    let document = Html::parse_document(html);

    let table = document.select(&TABLE_SELECTOR).next()?;

    let directorate = document
        .select(&HEADING_SELECTOR)
        .next()
        .map(|heading| {
            heading
                .text()
                .collect::<String>()
                .trim()
                .replace(HEADING_PREFIX, "")
                .replace(HEADING_SUFFIX, "")
        })
        .unwrap_or_default();

    let mut rows = table.select(&ROW_SELECTOR);
    let Some(header_row) = rows.next() else {
        return Some(Vec::new());
    };
    let headers: Vec<String> = header_row.select(&CELL_SELECTOR).map(cell_text).collect();

    let mut records = Vec::new();
    for row in rows {
        let cells: Vec<String> = row.select(&CELL_SELECTOR).map(cell_text).collect();
        if cells.len() != headers.len() {
            // Malformed row; cardinality mismatch against the header.
            debug!(
                cells = cells.len(),
                headers = headers.len(),
                source_url,
                "Skipping row with mismatched cell count"
            );
            continue;
        }
        records.push(MeetingRecord {
            fields: headers.iter().cloned().zip(cells).collect(),
            source_url: source_url.to_string(),
            directorate: directorate.clone(),
        });
    }

    Some(records)
}

/// Fetch and parse every known meetings page, sequentially.
///
/// A page that fails to fetch or has no table is logged and skipped; the
/// remaining pages still contribute their rows.
#[instrument(level = "info", skip_all)]
pub async fn collect_meeting_records<S: PageSource>(source: &S) -> Vec<MeetingRecord> {
    let mut all_records = Vec::new();

    for host_id in HOST_IDS {
        let url = meeting_page_url(host_id);
        info!(url = %url, "Scraping meetings page");

        let html = match source.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, url = %url, "Fetch failed; skipping page");
                continue;
            }
        };

        match parse_meetings_page(&html, &url) {
            Some(records) => {
                debug!(count = records.len(), url = %url, "Parsed meetings table");
                all_records.extend(records);
            }
            None => {
                warn!(url = %url, "No meetings table found");
            }
        }
    }

    info!(
        records = all_records.len(),
        pages = HOST_IDS.len(),
        "Collected meeting records"
    );
    all_records
}
