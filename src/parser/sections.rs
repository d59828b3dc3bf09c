//! Description and requirements sections of a detail page.
//!
//! Both sections are read in one pass by [`SectionScanner`], which walks
//! `BeforeDescription → InDescription → BeforeRequirements → InRequirements → Done`.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{element_text, is_heading, next_element, sanitize_element, selector};
use crate::constants::{BULLET, DESCRIPTION_MARKER, REQUIREMENTS_MARKER};

static HEADINGS: Lazy<Selector> = Lazy::new(|| selector("h1, h2, h3, h4, h5, h6"));
static REQUIREMENTS_CANDIDATES: Lazy<Selector> = Lazy::new(|| selector("h2, h3, strong, b"));
static LIST_ITEMS: Lazy<Selector> = Lazy::new(|| selector("li"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    BeforeDescription,
    InDescription,
    BeforeRequirements,
    InRequirements,
    Done,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftSections {
    /// Sanitized paragraphs joined by a blank line
    pub description: String,
    /// Sanitized list items, each prefixed with a bullet
    pub requirements: Vec<String>,
}

pub struct SectionScanner<'a> {
    document: &'a Html,
    state: SectionState,
    cursor: Option<ElementRef<'a>>,
    paragraphs: Vec<String>,
    requirements: Vec<String>,
}

impl<'a> SectionScanner<'a> {
    pub fn new(document: &'a Html) -> Self {
        Self {
            document,
            state: SectionState::BeforeDescription,
            cursor: None,
            paragraphs: Vec::new(),
            requirements: Vec::new(),
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Advance by one element (or one lookup) and return the new state.
    pub fn step(&mut self) -> SectionState {
        self.state = match self.state {
            SectionState::BeforeDescription => match self.description_heading() {
                Some(heading) => {
                    self.cursor = next_element(heading);
                    SectionState::InDescription
                }
                None => SectionState::BeforeRequirements,
            },
            SectionState::InDescription => match self.cursor {
                Some(element) if !ends_description(element) => {
                    if element.value().name() == "p" {
                        let text = sanitize_element(element);
                        if !text.is_empty() {
                            self.paragraphs.push(text);
                        }
                    }
                    self.cursor = next_element(element);
                    SectionState::InDescription
                }
                _ => SectionState::BeforeRequirements,
            },
            SectionState::BeforeRequirements => match self.requirements_list() {
                Some(list) => {
                    self.cursor = Some(list);
                    SectionState::InRequirements
                }
                None => SectionState::Done,
            },
            SectionState::InRequirements => {
                if let Some(list) = self.cursor.take() {
                    self.requirements.extend(
                        list.select(&LIST_ITEMS)
                            .map(sanitize_element)
                            .filter(|text| !text.is_empty())
                            .map(|text| format!("{BULLET}{text}")),
                    );
                }
                SectionState::Done
            }
            SectionState::Done => SectionState::Done,
        };
        self.state
    }

    pub fn run(mut self) -> ShiftSections {
        while self.step() != SectionState::Done {}
        debug!(
            paragraphs = self.paragraphs.len(),
            requirements = self.requirements.len(),
            "Scanned shift sections"
        );
        ShiftSections {
            description: self.paragraphs.join("\n\n"),
            requirements: self.requirements,
        }
    }

    fn description_heading(&self) -> Option<ElementRef<'a>> {
        self.document
            .select(&HEADINGS)
            .find(|h| element_text(*h).contains(DESCRIPTION_MARKER))
    }

    /// The list after the "Shift Requirements" marker. A bold marker wrapped
    /// in a paragraph has no list siblings of its own, so the paragraph's
    /// siblings are searched as well.
    fn requirements_list(&self) -> Option<ElementRef<'a>> {
        let marker = self
            .document
            .select(&REQUIREMENTS_CANDIDATES)
            .find(|el| element_text(*el).contains(REQUIREMENTS_MARKER))?;

        following_list(marker).or_else(|| {
            if matches!(marker.value().name(), "strong" | "b") {
                marker
                    .parent()
                    .and_then(ElementRef::wrap)
                    .and_then(following_list)
            } else {
                None
            }
        })
    }
}

fn ends_description(element: ElementRef) -> bool {
    is_heading(element) || element_text(element).contains(REQUIREMENTS_MARKER)
}

fn following_list(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "ul")
}

/// Description and requirements of a detail page.
pub fn scan_sections(document: &Html) -> ShiftSections {
    SectionScanner::new(document).run()
}
