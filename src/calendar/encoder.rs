use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

use crate::constants::month_index;
use crate::error::{Result, ShiftError};
use crate::parser::parse_clock;
use crate::types::RawDateTimeFields;

const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Start and end of an event as compact calendar timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWindow {
    pub start: String,
    pub end: String,
}

impl fmt::Display for EventWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

/// Encode a shift lasting `duration_minutes` in the local timezone.
///
/// The timestamps carry no offset; the calendar is told the zone
/// separately. Wall-clock time is resolved with the host's timezone rules,
/// so across a daylight-saving change the end can differ from the
/// calendar's zone by the DST shift.
pub fn encode_dates(fields: &RawDateTimeFields, duration_minutes: i64) -> Result<EventWindow> {
    encode_dates_in(fields, duration_minutes, &Local)
}

/// [`encode_dates`] with an explicit timezone.
pub fn encode_dates_in<Tz>(
    fields: &RawDateTimeFields,
    duration_minutes: i64,
    tz: &Tz,
) -> Result<EventWindow>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let month0 =
        month_index(&fields.month).ok_or_else(|| ShiftError::InvalidMonth(fields.month.clone()))?;
    let day: i64 = fields
        .day
        .trim()
        .parse()
        .map_err(|_| ShiftError::InvalidDate(format!("day '{}'", fields.day)))?;
    let year_text = fields
        .year
        .as_deref()
        .ok_or_else(|| ShiftError::MissingField("year".into()))?;
    let year: i32 = year_text
        .trim()
        .parse()
        .map_err(|_| ShiftError::InvalidDate(format!("year '{year_text}'")))?;
    let (hour, minute) = parse_clock(&fields.time)?;

    let wall_clock = wall_clock(year, month0, day, hour, minute)
        .ok_or_else(|| ShiftError::InvalidDate(describe(fields)))?;
    let start = resolve(tz, wall_clock).ok_or_else(|| ShiftError::InvalidDate(describe(fields)))?;
    let end = Duration::try_minutes(duration_minutes)
        .and_then(|duration| start.clone().checked_add_signed(duration))
        .ok_or_else(|| {
            ShiftError::InvalidDate(format!("duration of {duration_minutes} minutes"))
        })?;

    Ok(EventWindow {
        start: start.format(STAMP_FORMAT).to_string(),
        end: end.format(STAMP_FORMAT).to_string(),
    })
}

/// Naive date-time from possibly out-of-range parts. Like a calendar date
/// constructor, extra days spill into the next month and extra hours into
/// the next day.
fn wall_clock(year: i32, month0: u32, day: i64, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?.and_hms_opt(0, 0, 0)?;
    first
        .checked_add_signed(Duration::try_days(day.checked_sub(1)?)?)?
        .checked_add_signed(Duration::try_hours(i64::from(hour))?)?
        .checked_add_signed(Duration::try_minutes(i64::from(minute))?)
}

/// Local time in `tz`. Ambiguous times take the earlier instant; times in a
/// spring-forward gap move ahead by an hour.
fn resolve<Tz: TimeZone>(tz: &Tz, wall_clock: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&wall_clock).earliest().or_else(|| {
        let later = wall_clock.checked_add_signed(Duration::hours(1))?;
        tz.from_local_datetime(&later).earliest()
    })
}

fn describe(fields: &RawDateTimeFields) -> String {
    format!(
        "{} {} {} {}",
        fields.time,
        fields.month,
        fields.day,
        fields.year.as_deref().unwrap_or("")
    )
}
