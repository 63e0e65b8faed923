//! Calendar building blocks: the `MM-DD` key that aligns records across years,
//! a validated month number, and a year/month pair used to pick observations.

use crate::error::{InvalidRangeError, MalformedDateError};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Leap year used to validate keys, so that `02-29` is a legal calendar day.
const KEY_VALIDATION_YEAR: i32 = 2000;

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}

/// Identifies a day of the year independent of the year, e.g. `05-19`.
///
/// Month and day are always taken from a real calendar date (or validated
/// against one when parsed), so the key and its components cannot drift apart.
/// Ordering is chronological within a year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct DayKey {
    month: u32,
    day: u32,
}

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    pub fn month_of_year(self) -> MonthOfYear {
        MonthOfYear(self.month)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for DayKey {
    type Err = MalformedDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MalformedDateError::DayKey(s.to_string());
        let (month, day) = s.split_once('-').ok_or_else(malformed)?;
        if month.len() != 2 || day.len() != 2 {
            return Err(malformed());
        }
        let month: u32 = month.parse().map_err(|_| malformed())?;
        let day: u32 = day.parse().map_err(|_| malformed())?;
        NaiveDate::from_ymd_opt(KEY_VALIDATION_YEAR, month, day)
            .map(DayKey::from_date)
            .ok_or_else(malformed)
    }
}

impl Serialize for DayKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A month number guaranteed to lie in 1-12.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
pub struct MonthOfYear(u32);

impl MonthOfYear {
    pub fn new(month: u32) -> Result<Self, InvalidRangeError> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(InvalidRangeError::Month(month))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// English month name, as shown in month pickers.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }

    pub fn all() -> impl Iterator<Item = MonthOfYear> {
        (1..=12).map(MonthOfYear)
    }
}

impl TryFrom<u32> for MonthOfYear {
    type Error = InvalidRangeError;

    fn try_from(month: u32) -> Result<Self, Self::Error> {
        MonthOfYear::new(month)
    }
}

impl Display for MonthOfYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A specific month of a specific year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct YearMonth {
    year: i32,
    month: MonthOfYear,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidRangeError> {
        Ok(Self {
            year,
            month: MonthOfYear::new(month)?,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: MonthOfYear(date.month()),
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> MonthOfYear {
        self.month
    }

    pub fn previous(self) -> Self {
        match self.month.get() {
            1 => Self {
                year: self.year - 1,
                month: MonthOfYear(12),
            },
            m => Self {
                year: self.year,
                month: MonthOfYear(m - 1),
            },
        }
    }

    pub fn next(self) -> Self {
        match self.month.get() {
            12 => Self {
                year: self.year + 1,
                month: MonthOfYear(1),
            },
            m => Self {
                year: self.year,
                month: MonthOfYear(m + 1),
            },
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.get()
    }

    /// First and last day of the month, `None` only for years chrono cannot represent.
    pub fn date_range(self) -> Option<StartEndDate> {
        let month = self.month.get();
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.year, month, 1)?,
            end: NaiveDate::from_ymd_opt(self.year, month, days_in_month(self.year, month)?)?,
        })
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:04}", self.month.name(), self.year)
    }
}
