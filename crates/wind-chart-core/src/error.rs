// File: crates/wind-chart-core/src/error.rs
// Summary: Typed errors for payload parsing, date ranges and config overrides.

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload has no `data` array")]
    MissingData,
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("date range is incomplete: {0} date not set")]
    IncompleteRange(&'static str),
    #[error("unknown chart kind `{0}` (expected bar, line, scatter or arrow)")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
