//! Counters for the linking pipeline.
//!
//! Recorded through the `metrics` facade; they are no-ops until a recorder is
//! installed by the embedding application.

macro_rules! link_metric {
    ($area:literal, $name:literal) => {
        concat!("shift_calendar_", $area, "_", $name, "_total")
    };
}

pub struct LinkMetrics;

impl LinkMetrics {
    pub fn record_cards_seen(count: usize) {
        ::metrics::counter!(link_metric!("listing", "cards_seen")).increment(count as u64);
    }

    /// Card or page that produced no link, labelled with the error kind
    pub fn record_skipped(reason: &'static str) {
        ::metrics::counter!(link_metric!("listing", "skipped"), "reason" => reason).increment(1);
    }

    pub fn record_fetch_success() {
        ::metrics::counter!(link_metric!("detail", "fetch_ok")).increment(1);
    }

    pub fn record_fetch_failure() {
        ::metrics::counter!(link_metric!("detail", "fetch_failed")).increment(1);
    }

    pub fn record_link_built() {
        ::metrics::counter!(link_metric!("calendar", "links_built")).increment(1);
    }

    pub fn record_link_failed(reason: &'static str) {
        ::metrics::counter!(link_metric!("calendar", "links_failed"), "reason" => reason)
            .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Counts = Arc<Mutex<HashMap<String, u64>>>;

    #[derive(Default)]
    struct CountingRecorder {
        counts: Counts,
    }

    struct CountHandle {
        key: String,
        counts: Counts,
    }

    impl CounterFn for CountHandle {
        fn increment(&self, value: u64) {
            *self.counts.lock().unwrap().entry(self.key.clone()).or_default() += value;
        }

        fn absolute(&self, value: u64) {
            self.counts.lock().unwrap().insert(self.key.clone(), value);
        }
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let labels: Vec<String> = key
                .labels()
                .map(|label| format!("{}={}", label.key(), label.value()))
                .collect();
            let key = if labels.is_empty() {
                key.name().to_string()
            } else {
                format!("{}{{{}}}", key.name(), labels.join(","))
            };
            Counter::from_arc(Arc::new(CountHandle {
                key,
                counts: self.counts.clone(),
            }))
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[test]
    fn counters_are_named_by_area_and_labelled_by_reason() {
        let recorder = CountingRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            LinkMetrics::record_cards_seen(3);
            LinkMetrics::record_skipped("missing_field");
            LinkMetrics::record_skipped("missing_field");
            LinkMetrics::record_fetch_success();
            LinkMetrics::record_fetch_failure();
            LinkMetrics::record_link_built();
            LinkMetrics::record_link_failed("unparsable");
        });

        let counts = recorder.counts.lock().unwrap();
        assert_eq!(counts["shift_calendar_listing_cards_seen_total"], 3);
        assert_eq!(
            counts["shift_calendar_listing_skipped_total{reason=missing_field}"],
            2
        );
        assert_eq!(counts["shift_calendar_detail_fetch_ok_total"], 1);
        assert_eq!(counts["shift_calendar_detail_fetch_failed_total"], 1);
        assert_eq!(counts["shift_calendar_calendar_links_built_total"], 1);
        assert_eq!(
            counts["shift_calendar_calendar_links_failed_total{reason=unparsable}"],
            1
        );
    }
}
