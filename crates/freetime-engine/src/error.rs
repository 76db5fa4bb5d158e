//! Error types for freetime-engine operations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GapError {
    #[error("Invalid clamp window: end time {end} must be after start time {start}")]
    InvalidClamp { start: NaiveTime, end: NaiveTime },

    #[error("Invalid range: end date {end} must be after start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Timed event has no end time")]
    MissingEnd,

    #[error("Interval end must be after its start")]
    EmptyInterval,

    #[error("Local time {0} does not exist in the target timezone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GapError>;
