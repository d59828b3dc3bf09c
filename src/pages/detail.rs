use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::{PageContext, PageExtractor, PageVariant};
use crate::constants::SCHEDULED_MARKER;
use crate::error::Result;
use crate::parser::{
    element_text, parse_heading, parse_sentence, parse_title, scan_sections, selector,
    visible_text, ParsedTitle,
};
use crate::types::EventRecord;

static MAIN_HEADING: Lazy<Selector> = Lazy::new(|| selector("#main_content h4"));
static H4: Lazy<Selector> = Lazy::new(|| selector("h4"));
static TOP_HEADING: Lazy<Selector> = Lazy::new(|| selector("h1, h2"));
static SHIFT_ID_IN_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/shift_claim/(\d+)").expect("shift id regex"));

/// Adapter for a single shift's detail page (`/services/shift_claim/{id}/`)
#[derive(Debug, Default, Clone, Copy)]
pub struct DetailPage;

impl DetailPage {
    pub fn new() -> Self {
        Self
    }

    /// Whether the page says the member is scheduled for this shift.
    pub fn is_scheduled(document: &Html) -> bool {
        visible_text(document)
            .to_lowercase()
            .contains(SCHEDULED_MARKER)
    }

    fn stub(&self, document: &Html, context: &PageContext) -> EventRecord {
        let heading = document
            .select(&H4)
            .next()
            .or_else(|| document.select(&TOP_HEADING).next());
        let ParsedTitle {
            title,
            title_with_emoji,
        } = heading
            .map(|h| parse_title(&element_text(h)))
            .unwrap_or_default();

        let shift_id = shift_id_from_path(&context.path);
        let date_time = parse_sentence(&visible_text(document));
        if date_time.is_none() {
            debug!(path = %context.path, "No date sentence on detail page");
        }
        let sections = scan_sections(document);

        EventRecord {
            title,
            title_with_emoji,
            shift_id,
            date_time,
            description: sections.description,
            requirements: sections.requirements,
        }
    }
}

impl PageExtractor for DetailPage {
    fn variant(&self) -> PageVariant {
        PageVariant::Detail
    }

    fn extract_stubs(&self, document: &Html, context: &PageContext) -> Vec<Result<EventRecord>> {
        vec![Ok(self.stub(document, context))]
    }
}

/// Numeric shift id from a `/shift_claim/{id}` path or URL.
pub fn shift_id_from_path(path: &str) -> Option<String> {
    SHIFT_ID_IN_PATH
        .captures(path)
        .map(|caps| caps[1].to_string())
}

/// Rich record from a fetched detail page. Scheduling fields are left unset;
/// they always come from the stub.
pub(crate) fn rich_record(document: &Html) -> EventRecord {
    let ParsedTitle {
        title,
        title_with_emoji,
    } = document
        .select(&MAIN_HEADING)
        .next()
        .or_else(|| document.select(&H4).next())
        .map(|h| parse_heading(&element_text(h)))
        .unwrap_or_default();
    let sections = scan_sections(document);

    EventRecord {
        title,
        title_with_emoji,
        shift_id: None,
        date_time: None,
        description: sections.description,
        requirements: sections.requirements,
    }
}
