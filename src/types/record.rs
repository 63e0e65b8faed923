//! Row types flowing through record normalization and merging.

use crate::types::calendar::DayKey;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One entry of an extreme series exactly as the data source reported it.
///
/// Both fields are kept as text: coercion and date parsing happen during
/// normalization so that a bad entry can be rejected on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtremeEntry {
    pub value: String,
    pub occurrence_date: String,
}

impl RawExtremeEntry {
    pub fn new(value: impl Into<String>, occurrence_date: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            occurrence_date: occurrence_date.into(),
        }
    }
}

/// A coerced record value. `NoValue` marks a reported entry whose value was
/// missing or non-numeric (ACIS uses flags such as `M` or `T`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordValue {
    Value(f64),
    NoValue,
}

impl RecordValue {
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => RecordValue::Value(v),
            _ => RecordValue::NoValue,
        }
    }

    pub fn as_option(self) -> Option<f64> {
        match self {
            RecordValue::Value(v) => Some(v),
            RecordValue::NoValue => None,
        }
    }
}

/// A record value together with the year it was set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub value: f64,
    pub year: i32,
}

/// The state of one metric on one merged calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Extreme {
    /// The series reported a numeric record.
    Recorded(YearValue),
    /// The series had an entry for this day but its value was unusable.
    NoValue { year: i32 },
    /// The series never reached this calendar day.
    #[default]
    Absent,
}

impl Extreme {
    pub fn recorded(self) -> Option<YearValue> {
        match self {
            Extreme::Recorded(v) => Some(v),
            _ => None,
        }
    }

    pub fn value(self) -> Option<f64> {
        self.recorded().map(|v| v.value)
    }

    pub fn year(self) -> Option<i32> {
        match self {
            Extreme::Recorded(v) => Some(v.year),
            Extreme::NoValue { year } => Some(year),
            Extreme::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Extreme::Absent)
    }
}

/// A normalized extreme entry keyed by its calendar day.
///
/// Month, day, year and key all come from `occurrence_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecordRow {
    value: RecordValue,
    occurrence_date: NaiveDate,
    key: DayKey,
}

impl NormalizedRecordRow {
    pub fn new(value: RecordValue, occurrence_date: NaiveDate) -> Self {
        Self {
            value,
            occurrence_date,
            key: DayKey::from_date(occurrence_date),
        }
    }

    pub fn value(&self) -> RecordValue {
        self.value
    }

    pub fn occurrence_date(&self) -> NaiveDate {
        self.occurrence_date
    }

    pub fn key(&self) -> DayKey {
        self.key
    }

    pub fn month(&self) -> u32 {
        self.key.month()
    }

    pub fn day(&self) -> u32 {
        self.key.day()
    }

    pub fn year(&self) -> i32 {
        self.occurrence_date.year()
    }

    pub fn extreme(&self) -> Extreme {
        match self.value {
            RecordValue::Value(value) => Extreme::Recorded(YearValue {
                value,
                year: self.year(),
            }),
            RecordValue::NoValue => Extreme::NoValue { year: self.year() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_never_turns_flags_into_zero() {
        assert_eq!(RecordValue::coerce("102"), RecordValue::Value(102.0));
        assert_eq!(RecordValue::coerce(" 1.25 "), RecordValue::Value(1.25));
        assert_eq!(RecordValue::coerce("-12"), RecordValue::Value(-12.0));
        for flag in ["M", "T", "", "NaN", "inf"] {
            assert_eq!(RecordValue::coerce(flag), RecordValue::NoValue, "{}", flag);
        }
    }

    #[test]
    fn test_row_derives_calendar_fields_from_date() {
        let date = NaiveDate::from_ymd_opt(1980, 7, 4).unwrap();
        let row = NormalizedRecordRow::new(RecordValue::Value(102.0), date);
        assert_eq!(row.key().to_string(), "07-04");
        assert_eq!((row.month(), row.day(), row.year()), (7, 4, 1980));
        assert_eq!(
            row.extreme(),
            Extreme::Recorded(YearValue {
                value: 102.0,
                year: 1980
            })
        );
    }

    #[test]
    fn test_extreme_tri_state() -> Result<(), serde_json::Error> {
        let no_value = Extreme::NoValue { year: 1911 };
        assert_eq!(no_value.value(), None);
        assert_eq!(no_value.year(), Some(1911));
        assert!(!no_value.is_absent());
        assert!(Extreme::default().is_absent());
        assert_eq!(serde_json::to_string(&Extreme::Absent)?, "null");
        assert_eq!(
            serde_json::to_string(&Extreme::Recorded(YearValue {
                value: 3.5,
                year: 2001
            }))?,
            r#"{"value":3.5,"year":2001}"#
        );
        Ok(())
    }
}
