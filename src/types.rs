use serde::{Deserialize, Serialize};

/// Date and time fields as they appear on a shift page, before any conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDateTimeFields {
    /// Start time token such as "1:00 pm" or "10:30am"
    pub time: String,
    pub day_of_week: Option<String>,
    /// Month name, any case
    pub month: String,
    pub day: String,
    pub year: Option<String>,
}

/// One shift as extracted from a page, ready to be turned into a calendar link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub title_with_emoji: String,
    pub shift_id: Option<String>,
    pub date_time: Option<RawDateTimeFields>,
    /// Bold-only markup, paragraphs separated by a blank line; empty when absent
    pub description: String,
    /// Bullet lines in document order
    pub requirements: Vec<String>,
}

/// A calendar link built for one shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftLink {
    pub record: EventRecord,
    pub url: String,
}
