//! Google Calendar template links.

pub mod encoder;
pub mod link;

pub use encoder::{encode_dates, encode_dates_in, EventWindow};
pub use link::CalendarUrlBuilder;
