use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::month_index;
use crate::error::{Result, ShiftError};
use crate::types::RawDateTimeFields;

static TIME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(am|pm)").expect("time regex"));

// "1:00 pm, Sunday January 25, 2026"
static SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2}:\d{2}\s*(?:am|pm))\s*,?\s*(\w+day)\s+(\w+)\s+(\d{1,2})\s*,?\s+(\d{4})",
    )
    .expect("date sentence regex")
});

/// Date and time from the first `"<time>, <weekday> <month> <day>, <year>"`
/// sentence in `text`.
pub fn parse_sentence(text: &str) -> Option<RawDateTimeFields> {
    let caps = SENTENCE.captures(text)?;
    Some(RawDateTimeFields {
        time: caps[1].to_string(),
        day_of_week: Some(caps[2].to_string()),
        month: caps[3].to_string(),
        day: caps[4].to_string(),
        year: Some(caps[5].to_string()),
    })
}

/// First time token in a range such as `"10:30am - 1:15pm"`.
pub fn first_time_token(text: &str) -> Option<String> {
    TIME_TOKEN.find(text).map(|m| m.as_str().to_string())
}

/// Hour (24-hour clock) and minute of the first time token in `time`.
pub fn parse_clock(time: &str) -> Result<(u32, u32)> {
    let caps = TIME_TOKEN
        .captures(time)
        .ok_or_else(|| ShiftError::UnparsableTime(time.to_string()))?;
    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| ShiftError::UnparsableTime(time.to_string()))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| ShiftError::UnparsableTime(time.to_string()))?;
    let is_pm = caps[3].eq_ignore_ascii_case("pm");

    let hour = match (is_pm, hour) {
        (true, h) if h != 12 => h + 12,
        (false, 12) => 0,
        (_, h) => h,
    };
    Ok((hour, minute))
}

/// Year for a listing card that shows only month and day.
///
/// A month earlier in the year than `today`'s month is taken to be next
/// year. The day of the month is not considered, so a card for the 1st of
/// the current month stays in the current year. Unknown months keep the
/// current year.
pub fn infer_year(month: &str, today: NaiveDate) -> i32 {
    match month_index(month) {
        Some(index) if index < today.month0() => today.year() + 1,
        _ => today.year(),
    }
}
