use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown month name: {0}")]
    InvalidMonth(String),

    #[error("Could not parse time from '{0}'")]
    UnparsableTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Fetch failed: {message}")]
    Fetch { message: String },

    #[error("Shift {0} already has a calendar link")]
    AlreadyProcessed(String),

    #[error("Not a shift page: {0}")]
    UnsupportedPage(String),

    #[error("Not scheduled for shift {0}")]
    NotScheduled(String),
}

impl ShiftError {
    /// Short label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ShiftError::Http(_) | ShiftError::Fetch { .. } => "fetch",
            ShiftError::Json(_) => "json",
            ShiftError::Toml(_) | ShiftError::Config(_) => "config",
            ShiftError::Io(_) => "io",
            ShiftError::MissingField(_) => "missing_field",
            ShiftError::InvalidMonth(_)
            | ShiftError::UnparsableTime(_)
            | ShiftError::InvalidDate(_) => "unparsable",
            ShiftError::AlreadyProcessed(_) => "already_processed",
            ShiftError::UnsupportedPage(_) => "unsupported_page",
            ShiftError::NotScheduled(_) => "not_scheduled",
        }
    }
}

pub type Result<T> = std::result::Result<T, ShiftError>;
