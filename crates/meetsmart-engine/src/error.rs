//! Error types for meetsmart-engine operations.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Invalid interval for '{participant}' on {date}: start {start} is not before end {end}")]
    InvalidInterval {
        participant: String,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Invalid interval on {date}: start {start} is not before end {end}")]
    InvalidRange {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(i64),

    #[error("Invalid {field} preference: '{value}'")]
    InvalidPreference { field: &'static str, value: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchedulingError {
    /// Whether this error rejects malformed input, as opposed to a transport
    /// failure such as unparseable JSON.
    pub fn is_validation(&self) -> bool {
        !matches!(self, SchedulingError::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
