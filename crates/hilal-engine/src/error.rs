//! Error types for hilal-engine operations.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::ephemeris::Body;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HilalError {
    /// No rise/set event of `body` was found in the search window starting on `date`.
    #[error("No {body} setting event found within 24 hours of {date}")]
    MissingEphemerisEvent { body: Body, date: NaiveDate },

    /// Both the primary and the fallback conjunction search came back empty.
    #[error("No lunar conjunction found before {bound}")]
    NoConjunctionFound { bound: DateTime<Utc> },

    #[error("Date {date} precedes the calendar anchor {anchor}")]
    PreAnchorDate { date: NaiveDate, anchor: NaiveDate },

    #[error("Hijri month {month}/{year} precedes the calendar anchor")]
    PreAnchorMonth { year: i32, month: u32 },

    #[error("Invalid Hijri month: {0} (expected 1..=12)")]
    InvalidMonth(u32),
}

pub type Result<T> = std::result::Result<T, HilalError>;
