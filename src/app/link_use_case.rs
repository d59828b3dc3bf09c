use std::sync::Arc;

use futures::stream::{self, StreamExt};
use scraper::Html;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::DetailSource;
use crate::calendar::CalendarUrlBuilder;
use crate::error::{Result, ShiftError};
use crate::merge::merge_records;
use crate::metrics::LinkMetrics;
use crate::pages::{select_variant, DetailPage, ListingPage, PageContext, PageExtractor, PageVariant};
use crate::types::{EventRecord, ShiftLink};

/// A shift that produced no link
#[derive(Debug, Clone, Serialize)]
pub struct SkippedShift {
    pub shift_id: Option<String>,
    pub kind: &'static str,
    pub reason: String,
}

impl SkippedShift {
    fn new(shift_id: Option<String>, error: &ShiftError) -> Self {
        Self {
            shift_id,
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
}

/// Outcome of linking every shift on one page
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub variant: PageVariant,
    pub links: Vec<ShiftLink>,
    pub skipped: Vec<SkippedShift>,
}

impl PageReport {
    fn new(variant: PageVariant) -> Self {
        Self {
            variant,
            links: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, shift_id: Option<String>, error: &ShiftError) {
        LinkMetrics::record_skipped(error.kind());
        self.skipped.push(SkippedShift::new(shift_id, error));
    }
}

/// Turns portal pages into calendar links.
pub struct LinkUseCase {
    source: Arc<dyn DetailSource>,
    builder: CalendarUrlBuilder,
    max_concurrent_fetches: Option<usize>,
    require_scheduled: bool,
}

impl LinkUseCase {
    pub fn new(source: Arc<dyn DetailSource>, builder: CalendarUrlBuilder) -> Self {
        Self {
            source,
            builder,
            max_concurrent_fetches: None,
            require_scheduled: true,
        }
    }

    pub fn with_max_concurrent_fetches(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    pub fn with_require_scheduled(mut self, require: bool) -> Self {
        self.require_scheduled = require;
        self
    }

    /// Link every shift on the page at `context.path`.
    pub async fn link_page(&self, html: &str, context: &PageContext) -> Result<PageReport> {
        match select_variant(&context.path) {
            Some(PageVariant::Listing) => Ok(self.link_listing(html, context).await),
            Some(PageVariant::Detail) => self.link_detail(html, context, self.require_scheduled),
            None => Err(ShiftError::UnsupportedPage(context.path.clone())),
        }
    }

    /// Listing page: every card is enriched from its detail page, with all
    /// fetches in flight together. A card that fails never stops the rest.
    #[instrument(skip(self, html, context), fields(path = %context.path))]
    pub async fn link_listing(&self, html: &str, context: &PageContext) -> PageReport {
        let mut report = PageReport::new(PageVariant::Listing);

        let (stubs, card_ids) = {
            let document = Html::parse_document(html);
            let page = ListingPage::new();
            (
                page.extract_stubs(&document, context),
                page.card_shift_ids(&document),
            )
        };
        LinkMetrics::record_cards_seen(stubs.len());

        let mut ready = Vec::new();
        for (stub, shift_id) in stubs.into_iter().zip(card_ids) {
            match stub {
                Ok(record) => ready.push(record),
                Err(e) => {
                    debug!(shift_id = ?shift_id, error = %e, "Skipping shift card");
                    report.skip(shift_id, &e);
                }
            }
        }

        let limit = self.max_concurrent_fetches.unwrap_or(ready.len()).max(1);
        let records: Vec<EventRecord> = stream::iter(ready)
            .map(|stub| self.enrich(stub))
            .buffered(limit)
            .collect()
            .await;

        for record in records {
            self.push_link(&mut report, record);
        }
        info!(
            links = report.links.len(),
            skipped = report.skipped.len(),
            "Linked listing page"
        );
        report
    }

    /// Detail page: a single shift, read entirely from the page.
    pub fn link_detail(
        &self,
        html: &str,
        context: &PageContext,
        require_scheduled: bool,
    ) -> Result<PageReport> {
        let record = detail_record(html, context, require_scheduled)?;
        let mut report = PageReport::new(PageVariant::Detail);
        self.push_link(&mut report, record);
        Ok(report)
    }

    /// Fetch one shift's detail page and link it. The scheduled check is not
    /// applied; asking for a shift by id is explicit.
    #[instrument(skip(self))]
    pub async fn link_shift(&self, shift_id: &str) -> Result<ShiftLink> {
        let html = self.source.fetch_detail(shift_id).await?;
        let context = PageContext::now(format!("/services/shift_claim/{shift_id}/"));
        let record = detail_record(&html, &context, false)?;
        let url = self.builder.build(&record)?;
        LinkMetrics::record_link_built();
        Ok(ShiftLink { record, url })
    }

    async fn enrich(&self, stub: EventRecord) -> EventRecord {
        let Some(shift_id) = stub.shift_id.clone() else {
            return stub;
        };
        let rich = match self.source.fetch_detail(&shift_id).await {
            Ok(html) => {
                LinkMetrics::record_fetch_success();
                parse_rich(&html)
            }
            Err(e) => {
                LinkMetrics::record_fetch_failure();
                warn!(shift_id = %shift_id, error = %e, "Failed to fetch shift details; using card fields only");
                EventRecord::default()
            }
        };
        merge_records(stub, rich)
    }

    fn push_link(&self, report: &mut PageReport, record: EventRecord) {
        match self.builder.build(&record) {
            Ok(url) => {
                LinkMetrics::record_link_built();
                report.links.push(ShiftLink { record, url });
            }
            Err(e) => {
                warn!(shift_id = ?record.shift_id, error = %e, "Could not build calendar link");
                LinkMetrics::record_link_failed(e.kind());
                report.skipped.push(SkippedShift::new(record.shift_id.clone(), &e));
            }
        }
    }
}

fn detail_record(html: &str, context: &PageContext, require_scheduled: bool) -> Result<EventRecord> {
    let document = Html::parse_document(html);
    let page = DetailPage::new();
    let record = page
        .extract_stubs(&document, context)
        .into_iter()
        .next()
        .unwrap_or_else(|| Err(ShiftError::MissingField("shift".into())))?;
    if require_scheduled && !DetailPage::is_scheduled(&document) {
        let id = record.shift_id.unwrap_or_default();
        info!(shift_id = %id, "Not scheduled for this shift");
        return Err(ShiftError::NotScheduled(id));
    }
    Ok(record)
}

fn parse_rich(html: &str) -> EventRecord {
    let document = Html::parse_document(html);
    DetailPage::new().extract_rich(&document)
}
