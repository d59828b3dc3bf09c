/// Portal and calendar constants shared across the crate.
/// Config values default to these; the parsers rely on the markers directly.

// Member services portal
pub const PORTAL_BASE_URL: &str = "https://members.foodcoop.com/services";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

// Google Calendar template endpoint
pub const CALENDAR_BASE_URL: &str = "https://calendar.google.com/calendar/render";
pub const CALENDAR_TIMEZONE: &str = "America/New_York";
pub const COOP_LOCATION: &str = "Park Slope Food Coop, 782 Union St, Brooklyn, NY 11215";
pub const DEFAULT_SHIFT_MINUTES: i64 = 165;

// Event text
pub const EVENT_TITLE_PREFIX: &str = "PSFC Shift: ";
pub const DESCRIPTION_HEADER: &str = "<b>SHIFT DESCRIPTION</b>";
pub const REQUIREMENTS_HEADER: &str = "<b>SHIFT REQUIREMENTS</b>";
pub const NO_DETAILS_NOTE: &str = "Open the shift link above for full shift details and requirements.";
pub const BULLET: &str = "• ";

// Page markers
pub const DESCRIPTION_MARKER: &str = "Shift Description";
pub const REQUIREMENTS_MARKER: &str = "Shift Requirements";
pub const SCHEDULED_MARKER: &str = "currently scheduled to work this shift";
/// Class of the element that holds an inserted calendar link.
pub const CALENDAR_WRAPPER_CLASS: &str = "cooperator-calendar-wrapper";

pub const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// 0-based index of a month name, case-insensitive.
pub fn month_index(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    MONTHS.iter().position(|m| *m == name).map(|i| i as u32)
}

/// Detail page URL for a shift id.
pub fn shift_claim_url(portal_base: &str, shift_id: &str) -> String {
    format!("{}/shift_claim/{}/", portal_base.trim_end_matches('/'), shift_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lookup_ignores_case() {
        assert_eq!(month_index("January"), Some(0));
        assert_eq!(month_index("DECEMBER"), Some(11));
        assert_eq!(month_index(" may "), Some(4));
        assert_eq!(month_index("Smarch"), None);
    }

    #[test]
    fn claim_url_has_trailing_slash() {
        assert_eq!(
            shift_claim_url("https://members.foodcoop.com/services/", "1066265"),
            "https://members.foodcoop.com/services/shift_claim/1066265/"
        );
    }
}
