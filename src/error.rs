use crate::acis::error::AcisError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Acis(#[from] AcisError),

    #[error(transparent)]
    Range(#[from] InvalidRangeError),

    #[error("Failed building DataFrame view")]
    Frame(#[from] PolarsError),
}

/// A date or calendar-day key that could not be parsed.
///
/// Rows carrying one of these are dropped by the batch that produced it;
/// the error is handed back so callers can report what was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedDateError {
    #[error("Malformed date '{input}'")]
    Date {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Malformed calendar-day key '{0}', expected MM-DD")]
    DayKey(String),
}

impl MalformedDateError {
    pub fn input(&self) -> &str {
        match self {
            MalformedDateError::Date { input, .. } => input,
            MalformedDateError::DayKey(input) => input,
        }
    }
}

/// Caller asked for a month or year that cannot exist for the data at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    #[error("Month {0} is outside 1-12")]
    Month(u32),

    #[error("Day {day} does not exist in month {month}")]
    Day { month: u32, day: u32 },

    #[error("Year {year} is outside the observation history ({first}-{last})")]
    YearOutsideHistory { year: i32, first: i32, last: i32 },

    #[error("Year {year} requested from an empty observation history")]
    EmptyHistory { year: i32 },
}
