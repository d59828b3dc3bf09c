use once_cell::sync::Lazy;
use regex::Regex;

/// One pictograph, symbol, or dingbat, with an optional emoji variation selector.
const EMOJI: &str = r"[\x{1F300}-\x{1F9FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]\x{FE0F}?";

static LEADING_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^([A-Za-z][A-Za-z\s]*[A-Za-z])\s*({EMOJI})?")).expect("title regex")
});

// Card names never span lines, but may contain a colon ("Office: Receiving").
static CARD_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"([A-Za-z][A-Za-z \t:]*[A-Za-z])\s*({EMOJI})?")).expect("card name regex")
});

static HEADING_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Shift\s*#|\d{1,2}:\d{2}\s*(?:am|pm)").expect("heading tail regex")
});

static HEADING_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?s)^(.+?)\s*({EMOJI})?\s*$")).expect("heading name regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTitle {
    pub title: String,
    pub title_with_emoji: String,
}

impl ParsedTitle {
    fn new(name: &str, emoji: Option<&str>) -> Self {
        let title = name.trim().to_string();
        let title_with_emoji = match emoji {
            Some(emoji) => format!("{title} {emoji}"),
            None => title.clone(),
        };
        Self {
            title,
            title_with_emoji,
        }
    }

    fn from_captures(caps: &regex::Captures) -> Self {
        let name = caps.get(1).map_or("", |m| m.as_str());
        Self::new(name, caps.get(2).map(|m| m.as_str()))
    }
}

/// Title from a heading: the leading run of letters and spaces, then an
/// optional emoji. Headings that do not start with a letter fall back to
/// their first word.
pub fn parse_title(text: &str) -> ParsedTitle {
    let text = text.trim();
    match LEADING_NAME.captures(text) {
        Some(caps) => ParsedTitle::from_captures(&caps),
        None => ParsedTitle::new(text.split_whitespace().next().unwrap_or(""), None),
    }
}

/// Name from the content column of a listing card. Empty when the card has
/// no run of letters.
pub fn parse_card_name(text: &str) -> ParsedTitle {
    CARD_NAME
        .captures(text)
        .map(|caps| ParsedTitle::from_captures(&caps))
        .unwrap_or_default()
}

/// Title from a detail page heading such as
/// `"Checkout 💳 Shift #1066265 1:00 pm, Sunday January 25, 2026"`.
/// Everything from `Shift #` or the first time onward is ignored.
pub fn parse_heading(text: &str) -> ParsedTitle {
    let head = HEADING_TAIL.split(text).next().unwrap_or("").trim();
    if head.is_empty() {
        return ParsedTitle::default();
    }
    match HEADING_NAME.captures(head) {
        Some(caps) => ParsedTitle::from_captures(&caps),
        None => ParsedTitle::new(head, None),
    }
}
