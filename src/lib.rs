pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod merge;
pub mod metrics;
pub mod pages;
pub mod parser;
pub mod types;

// Application use cases and the infrastructure behind their ports
pub mod app;
pub mod infra;

pub use calendar::{encode_dates, CalendarUrlBuilder, EventWindow};
pub use config::Config;
pub use error::{Result, ShiftError};
pub use pages::{select_variant, PageContext, PageVariant};
pub use types::{EventRecord, RawDateTimeFields, ShiftLink};
