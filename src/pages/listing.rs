use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};
use tracing::debug;

use super::{PageContext, PageExtractor, PageVariant};
use crate::constants::CALENDAR_WRAPPER_CLASS;
use crate::error::{Result, ShiftError};
use crate::parser::{
    collapse_whitespace, element_text, first_time_token, infer_year, parse_card_name, selector,
};
use crate::types::{EventRecord, RawDateTimeFields};

static SHIFT_CARD: Lazy<Selector> = Lazy::new(|| selector(".shiftcard"));
static DATE_CARD: Lazy<Selector> = Lazy::new(|| selector(".datecard"));
static MONTH: Lazy<Selector> = Lazy::new(|| selector(".month"));
static DATE: Lazy<Selector> = Lazy::new(|| selector(".date"));
static WEEKDAY: Lazy<Selector> = Lazy::new(|| selector(".day"));
static TIME_CARD: Lazy<Selector> = Lazy::new(|| selector(".timecard"));
static CONTENT: Lazy<Selector> = Lazy::new(|| selector(".col-8, .col-sm-9, .col-md-10"));
static SHIFT_LINK: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="shift_claim"]"#));
static CALENDAR_WRAPPER: Lazy<Selector> =
    Lazy::new(|| selector(&format!(".{CALENDAR_WRAPPER_CLASS}")));
static SHIFT_ID_IN_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"shift_claim/(\d+)").expect("shift link regex"));

/// Adapter for the member home page, which shows upcoming shifts as cards
#[derive(Debug, Default, Clone, Copy)]
pub struct ListingPage;

impl ListingPage {
    pub fn new() -> Self {
        Self
    }

    /// Shift id linked from each `.shiftcard`, in page order.
    pub fn card_shift_ids(&self, document: &Html) -> Vec<Option<String>> {
        document.select(&SHIFT_CARD).map(shift_id).collect()
    }

    /// Stub record for one `.shiftcard`.
    pub fn extract_card(&self, card: ElementRef, context: &PageContext) -> Result<EventRecord> {
        if card.select(&CALENDAR_WRAPPER).next().is_some() {
            let id = shift_id(card).unwrap_or_default();
            return Err(ShiftError::AlreadyProcessed(id));
        }

        let date_card = card
            .select(&DATE_CARD)
            .next()
            .ok_or_else(|| ShiftError::MissingField("datecard".into()))?;
        let month = field_text(date_card, &MONTH);
        let day = field_text(date_card, &DATE);
        let day_of_week = field_text(date_card, &WEEKDAY);
        let time = card
            .select(&TIME_CARD)
            .next()
            .and_then(|t| first_time_token(&element_text(t)));

        let name = card
            .select(&CONTENT)
            .next()
            .map(|content| parse_card_name(&lines_of(content)))
            .unwrap_or_default();
        let shift_id = shift_id(card);

        let month = month.ok_or_else(|| ShiftError::MissingField("month".into()))?;
        let day = day.ok_or_else(|| ShiftError::MissingField("day".into()))?;
        let time = time.ok_or_else(|| ShiftError::MissingField("time".into()))?;
        let shift_id = shift_id.ok_or_else(|| ShiftError::MissingField("shift id".into()))?;
        if name.title.is_empty() {
            return Err(ShiftError::MissingField(format!("title of shift {shift_id}")));
        }

        let year = infer_year(&month, context.today);
        Ok(EventRecord {
            title: name.title,
            title_with_emoji: name.title_with_emoji,
            shift_id: Some(shift_id),
            date_time: Some(RawDateTimeFields {
                time,
                day_of_week,
                month,
                day,
                year: Some(year.to_string()),
            }),
            description: String::new(),
            requirements: Vec::new(),
        })
    }
}

impl PageExtractor for ListingPage {
    fn variant(&self) -> PageVariant {
        PageVariant::Listing
    }

    fn extract_stubs(&self, document: &Html, context: &PageContext) -> Vec<Result<EventRecord>> {
        let mut seen = HashSet::new();
        let stubs: Vec<_> = document
            .select(&SHIFT_CARD)
            .map(|card| {
                let record = self.extract_card(card, context)?;
                match &record.shift_id {
                    Some(id) if !seen.insert(id.clone()) => {
                        Err(ShiftError::AlreadyProcessed(id.clone()))
                    }
                    _ => Ok(record),
                }
            })
            .collect();
        debug!(cards = stubs.len(), "Extracted listing cards");
        stubs
    }
}

fn field_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| element_text(el).trim().to_string())
        .filter(|text| !text.is_empty())
}

fn shift_id(card: ElementRef) -> Option<String> {
    card.select(&SHIFT_LINK)
        .filter_map(|link| link.value().attr("href"))
        .find_map(|href| SHIFT_ID_IN_HREF.captures(href))
        .map(|caps| caps[1].to_string())
}

/// Text nodes of the card's content column, one per line.
fn lines_of(element: ElementRef) -> String {
    element
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(collapse_whitespace(text)),
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn card(inner: &str) -> String {
        format!(r#"<html><body><div class="shiftcard"><div class="row">{inner}</div></div></body></html>"#)
    }

    const DATE_AND_TIME: &str = r#"
        <div class="col-4">
          <div class="datecard"><div class="day">Sun</div><div class="month">January</div><div class="date">25</div></div>
          <div class="timecard">1:00pm - 3:45pm</div>
        </div>"#;

    fn context() -> PageContext {
        PageContext::new("/services/home/", NaiveDate::from_ymd_opt(2026, 8, 3).unwrap())
    }

    fn stubs(html: &str) -> Vec<Result<EventRecord>> {
        ListingPage::new().extract_stubs(&Html::parse_document(html), &context())
    }

    #[test]
    fn reads_card_fields_and_infers_year() {
        let html = card(&format!(
            r#"{DATE_AND_TIME}
            <div class="col-8 col-sm-9 col-md-10">
              <b>Checkout</b> <span>🛒</span><br>
              <a href="/services/shift_claim/1066265/">View in Shift Calendar</a>
            </div>"#
        ));
        let record = stubs(&html).remove(0).unwrap();
        assert_eq!(record.title, "Checkout");
        assert_eq!(record.title_with_emoji, "Checkout 🛒");
        assert_eq!(record.shift_id.as_deref(), Some("1066265"));
        let date_time = record.date_time.unwrap();
        assert_eq!(date_time.time, "1:00pm");
        assert_eq!(date_time.day_of_week.as_deref(), Some("Sun"));
        assert_eq!(date_time.month, "January");
        assert_eq!(date_time.day, "25");
        // January is before August, so it is next year's January.
        assert_eq!(date_time.year.as_deref(), Some("2027"));
        assert!(record.description.is_empty());
    }

    #[test]
    fn name_wrapped_across_source_lines_is_kept_whole() {
        let html = card(&format!(
            "{DATE_AND_TIME}<div class=\"col-8\"><b>Office:\n      Receiving</b><br>\
             <a href=\"/services/shift_claim/31/\">View in Shift Calendar</a></div>"
        ));
        let record = stubs(&html).remove(0).unwrap();
        assert_eq!(record.title, "Office: Receiving");
    }

    #[test]
    fn card_without_shift_link_is_skipped() {
        let html = card(&format!(
            r#"{DATE_AND_TIME}<div class="col-8">Checkout</div>"#
        ));
        assert!(matches!(
            stubs(&html).remove(0),
            Err(ShiftError::MissingField(field)) if field == "shift id"
        ));
    }

    #[test]
    fn card_without_time_is_skipped() {
        let html = card(
            r#"<div class="datecard"><div class="month">May</div><div class="date">2</div></div>
               <div class="timecard">TBD</div>
               <div class="col-8">Receiving <a href="/services/shift_claim/7/">View</a></div>"#,
        );
        assert!(matches!(
            stubs(&html).remove(0),
            Err(ShiftError::MissingField(field)) if field == "time"
        ));
    }

    #[test]
    fn card_already_linked_is_not_processed_again() {
        let html = card(&format!(
            r#"{DATE_AND_TIME}
            <div class="col-8">Checkout <a href="/services/shift_claim/9/">View</a>
              <span class="cooperator-calendar-wrapper">| <a>Add to Google Calendar</a></span>
            </div>"#
        ));
        assert!(matches!(
            stubs(&html).remove(0),
            Err(ShiftError::AlreadyProcessed(id)) if id == "9"
        ));
    }

    #[test]
    fn duplicate_shift_ids_are_linked_once() {
        let one = format!(
            r#"<div class="shiftcard">{DATE_AND_TIME}<div class="col-8">Checkout <a href="/services/shift_claim/5/">View</a></div></div>"#
        );
        let html = format!("<html><body>{one}{one}</body></html>");
        let results = stubs(&html);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(&results[1], Err(ShiftError::AlreadyProcessed(id)) if id == "5"));
    }

    #[test]
    fn card_ids_follow_page_order() {
        let good = format!(
            r#"<div class="shiftcard">{DATE_AND_TIME}<div class="col-8">Checkout <a href="/services/shift_claim/5/">View</a></div></div>"#
        );
        let bare = r#"<div class="shiftcard"><div class="col-8">No link</div></div>"#;
        let html = format!("<html><body>{bare}{good}</body></html>");
        let ids = ListingPage::new().card_shift_ids(&Html::parse_document(&html));
        assert_eq!(ids, vec![None, Some("5".to_string())]);
    }

    #[test]
    fn bad_card_does_not_affect_others() {
        let good = format!(
            r#"<div class="shiftcard">{DATE_AND_TIME}<div class="col-8">Checkout <a href="/services/shift_claim/5/">View</a></div></div>"#
        );
        let bad = r#"<div class="shiftcard"><div class="col-8">No date card</div></div>"#;
        let html = format!("<html><body>{bad}{good}</body></html>");
        let results = stubs(&html);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap().shift_id.as_deref(), Some("5"));
    }
}
