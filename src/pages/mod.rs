//! Page adapters.
//!
//! The portal serves two layouts: the home page lists the member's upcoming
//! shifts as cards, and each shift has a detail ("shift claim") page. Each
//! layout has an adapter implementing [`PageExtractor`].

pub mod detail;
pub mod listing;

use chrono::NaiveDate;
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::EventRecord;

pub use detail::DetailPage;
pub use listing::ListingPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageVariant {
    Listing,
    Detail,
}

/// Where a page was loaded from and when.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Navigation path, e.g. `/services/shift_claim/1066265/`
    pub path: String,
    /// Used to infer the year of listing cards
    pub today: NaiveDate,
}

impl PageContext {
    pub fn new(path: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            path: path.into(),
            today,
        }
    }

    /// Context for a page loaded now.
    pub fn now(path: impl Into<String>) -> Self {
        Self::new(path, chrono::Local::now().date_naive())
    }
}

/// Which layout a navigation path serves, if any.
pub fn select_variant(path: &str) -> Option<PageVariant> {
    if path == "/services" || path == "/services/" || path.contains("/services/home") {
        Some(PageVariant::Listing)
    } else if path.contains("/shift_claim/") {
        Some(PageVariant::Detail)
    } else {
        None
    }
}

/// Extraction capability shared by both layouts
pub trait PageExtractor: Send + Sync {
    fn variant(&self) -> PageVariant;

    /// Stub records from the fields visible on the page, one per shift
    /// entry. An entry that cannot be linked yields an error and does not
    /// affect the others.
    fn extract_stubs(&self, document: &Html, context: &PageContext) -> Vec<Result<EventRecord>>;

    /// Title, description and requirements as laid out on a detail page.
    fn extract_rich(&self, document: &Html) -> EventRecord {
        detail::rich_record(document)
    }
}

pub fn extractor_for(variant: PageVariant) -> Box<dyn PageExtractor> {
    match variant {
        PageVariant::Listing => Box::new(ListingPage::new()),
        PageVariant::Detail => Box::new(DetailPage::new()),
    }
}
