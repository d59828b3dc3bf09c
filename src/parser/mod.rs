//! Parsers shared by both page layouts.
//!
//! Every function here takes the parsed document (or an element of it) as a
//! parameter; nothing reads global page state.

pub mod datetime;
pub mod sanitize;
pub mod sections;
pub mod title;

use once_cell::sync::Lazy;
use scraper::{node::Node, ElementRef, Html, Selector};

pub use datetime::{first_time_token, infer_year, parse_clock, parse_sentence};
pub use sanitize::{sanitize_element, sanitize_fragment};
pub use sections::{scan_sections, SectionScanner, SectionState, ShiftSections};
pub use title::{parse_card_name, parse_heading, parse_title, ParsedTitle};

static BODY: Lazy<Selector> = Lazy::new(|| selector("body"));

/// Compile a selector known at build time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector '{css}': {e:?}"))
}

/// Concatenated text of an element, like `textContent`.
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Text of the page body with text nodes joined by single spaces.
/// Script and style contents are left out.
pub fn visible_text(document: &Html) -> String {
    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());
    let mut parts = Vec::new();
    collect_visible(root, &mut parts);
    parts.join(" ")
}

fn collect_visible(element: ElementRef, parts: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let collapsed = collapse_whitespace(text);
                if !collapsed.is_empty() {
                    parts.push(collapsed);
                }
            }
            Node::Element(el) if matches!(el.name(), "script" | "style" | "noscript") => {}
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_visible(child_ref, parts);
                }
            }
            _ => {}
        }
    }
}

/// `text` with every whitespace run, line breaks included, reduced to one
/// space and the ends trimmed.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Next sibling that is an element.
pub(crate) fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

pub(crate) fn is_heading(element: ElementRef) -> bool {
    matches!(
        element.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}
