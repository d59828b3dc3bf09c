use url::form_urlencoded;

use super::encoder::encode_dates;
use crate::config::{CalendarConfig, PortalConfig};
use crate::constants::{
    shift_claim_url, DESCRIPTION_HEADER, EVENT_TITLE_PREFIX, NO_DETAILS_NOTE, REQUIREMENTS_HEADER,
};
use crate::error::Result;
use crate::types::EventRecord;

/// Builds `action=TEMPLATE` links that open a pre-filled event form.
#[derive(Debug, Clone)]
pub struct CalendarUrlBuilder {
    base_url: String,
    timezone: String,
    location: String,
    duration_minutes: i64,
    portal_base_url: String,
}

impl Default for CalendarUrlBuilder {
    fn default() -> Self {
        Self::new(&CalendarConfig::default(), &PortalConfig::default())
    }
}

impl CalendarUrlBuilder {
    pub fn new(calendar: &CalendarConfig, portal: &PortalConfig) -> Self {
        Self {
            base_url: calendar.base_url.clone(),
            timezone: calendar.timezone.clone(),
            location: calendar.location.clone(),
            duration_minutes: calendar.duration_minutes,
            portal_base_url: portal.base_url.clone(),
        }
    }

    /// Full calendar URL for `record`. Fails only when the record's date or
    /// time cannot be encoded.
    pub fn build(&self, record: &EventRecord) -> Result<String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("action", "TEMPLATE");
        query.append_pair("text", &self.event_text(record));

        if let Some(date_time) = &record.date_time {
            let window = encode_dates(date_time, self.duration_minutes)?;
            query.append_pair("dates", &window.to_string());
            query.append_pair("ctz", &self.timezone);
        }

        query.append_pair("details", &self.details(record));
        query.append_pair("location", &self.location);

        Ok(format!("{}?{}", self.base_url, query.finish()))
    }

    pub fn event_text(&self, record: &EventRecord) -> String {
        let mut text = format!("{EVENT_TITLE_PREFIX}{}", record.title_with_emoji);
        if let Some(id) = &record.shift_id {
            text.push_str(&format!(" (Shift #{id})"));
        }
        text
    }

    /// Event description: link back to the shift, then the description and
    /// requirements sections when present.
    pub fn details(&self, record: &EventRecord) -> String {
        let mut details = String::new();
        if let Some(id) = &record.shift_id {
            details.push_str(&format!(
                "View shift: {}\n\n",
                shift_claim_url(&self.portal_base_url, id)
            ));
        }
        if !record.description.is_empty() {
            details.push_str(&format!("{DESCRIPTION_HEADER}\n\n{}\n\n", record.description));
        } else if record.shift_id.is_some() {
            details.push_str(&format!("{NO_DETAILS_NOTE}\n\n"));
        }
        if !record.requirements.is_empty() {
            details.push_str(&format!(
                "{REQUIREMENTS_HEADER}\n\n{}",
                record.requirements.join("\n")
            ));
        }
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShiftError;
    use crate::types::RawDateTimeFields;
    use std::collections::HashMap;

    fn query(url: &str) -> HashMap<String, String> {
        let (_, query) = url.split_once('?').unwrap();
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    fn record() -> EventRecord {
        EventRecord {
            title: "Checkout".into(),
            title_with_emoji: "Checkout 💳".into(),
            shift_id: Some("1066265".into()),
            date_time: Some(RawDateTimeFields {
                time: "1:00 pm".into(),
                day_of_week: Some("Sunday".into()),
                month: "January".into(),
                day: "25".into(),
                year: Some("2026".into()),
            }),
            description: "Run a <b>register</b>.".into(),
            requirements: vec!["• Be on time".into(), "• Wear shoes".into()],
        }
    }

    #[test]
    fn full_record() {
        let url = CalendarUrlBuilder::default().build(&record()).unwrap();
        assert!(url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE&"));

        let params = query(&url);
        assert_eq!(params["text"], "PSFC Shift: Checkout 💳 (Shift #1066265)");
        assert_eq!(params["dates"], "20260125T130000/20260125T154500");
        assert_eq!(params["ctz"], "America/New_York");
        assert_eq!(
            params["details"],
            "View shift: https://members.foodcoop.com/services/shift_claim/1066265/\n\n\
             <b>SHIFT DESCRIPTION</b>\n\nRun a <b>register</b>.\n\n\
             <b>SHIFT REQUIREMENTS</b>\n\n• Be on time\n• Wear shoes"
        );
        assert_eq!(
            params["location"],
            "Park Slope Food Coop, 782 Union St, Brooklyn, NY 11215"
        );
    }

    #[test]
    fn spaces_are_form_encoded() {
        let url = CalendarUrlBuilder::default().build(&record()).unwrap();
        assert!(url.contains("text=PSFC+Shift%3A+Checkout+"));
    }

    #[test]
    fn no_date_time_omits_dates_and_ctz() {
        let mut record = record();
        record.date_time = None;
        let params = query(&CalendarUrlBuilder::default().build(&record).unwrap());
        assert!(!params.contains_key("dates"));
        assert!(!params.contains_key("ctz"));
        assert_eq!(params["action"], "TEMPLATE");
    }

    #[test]
    fn shift_without_description_points_to_the_link() {
        let mut record = record();
        record.description.clear();
        record.requirements.clear();
        let details = CalendarUrlBuilder::default().details(&record);
        assert_eq!(
            details,
            "View shift: https://members.foodcoop.com/services/shift_claim/1066265/\n\n\
             Open the shift link above for full shift details and requirements.\n\n"
        );
    }

    #[test]
    fn record_without_shift_id() {
        let record = EventRecord {
            title: "Lobby".into(),
            title_with_emoji: "Lobby".into(),
            ..EventRecord::default()
        };
        let builder = CalendarUrlBuilder::default();
        assert_eq!(builder.event_text(&record), "PSFC Shift: Lobby");
        assert_eq!(builder.details(&record), "");
    }

    #[test]
    fn bad_month_fails_only_this_record() {
        let mut record = record();
        if let Some(date_time) = record.date_time.as_mut() {
            date_time.month = "Smarch".into();
        }
        assert!(matches!(
            CalendarUrlBuilder::default().build(&record),
            Err(ShiftError::InvalidMonth(_))
        ));
    }

    #[test]
    fn uses_configured_portal_and_location() {
        let calendar = CalendarConfig {
            location: "Somewhere".into(),
            ..CalendarConfig::default()
        };
        let portal = PortalConfig {
            base_url: "http://localhost:8080/services/".into(),
            ..PortalConfig::default()
        };
        let mut record = record();
        record.date_time = None;
        let params = query(&CalendarUrlBuilder::new(&calendar, &portal).build(&record).unwrap());
        assert_eq!(params["location"], "Somewhere");
        assert!(params["details"].starts_with("View shift: http://localhost:8080/services/shift_claim/1066265/"));
    }
}
