pub mod link_use_case;
pub mod ports;

pub use link_use_case::{LinkUseCase, PageReport, SkippedShift};
pub use ports::DetailSource;
