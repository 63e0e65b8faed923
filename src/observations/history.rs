use crate::error::{InvalidRangeError, MalformedDateError};
use crate::types::calendar::YearMonth;
use crate::types::observation::{DailyObservation, MonthObservation};
use chrono::Datelike;

/// A station's full daily observation history, ordered by date.
///
/// Built once per station load and never modified afterwards; month views
/// are copies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationHistory {
    observations: Vec<DailyObservation>,
    rejected: Vec<MalformedDateError>,
}

impl ObservationHistory {
    pub fn new(mut observations: Vec<DailyObservation>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self {
            observations,
            rejected: Vec::new(),
        }
    }

    /// Attaches the rows that were dropped while loading because their date
    /// did not parse.
    pub(crate) fn with_rejected(mut self, rejected: Vec<MalformedDateError>) -> Self {
        self.rejected = rejected;
        self
    }

    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    pub fn rejected(&self) -> &[MalformedDateError] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First and last year with observations, `None` for an empty history.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.observations.first()?.date.year();
        let last = self.observations.last()?.date.year();
        Some((first, last))
    }

    /// The month of the most recent observation.
    pub fn latest_month(&self) -> Option<YearMonth> {
        self.observations.last().map(|o| YearMonth::from_date(o.date))
    }

    /// Observations of `month` (1-12) in `year`, each tagged with its day of month.
    ///
    /// A valid month with no observations yields an empty vector.
    ///
    /// # Errors
    ///
    /// [`InvalidRangeError::Month`] for a month outside 1-12,
    /// [`InvalidRangeError::YearOutsideHistory`] or
    /// [`InvalidRangeError::EmptyHistory`] for a year the history does not cover.
    pub fn for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthObservation>, InvalidRangeError> {
        let target = YearMonth::new(year, month)?;
        self.for_year_month(target)
    }

    pub fn for_year_month(
        &self,
        target: YearMonth,
    ) -> Result<Vec<MonthObservation>, InvalidRangeError> {
        self.check_year(target.year())?;
        Ok(self
            .observations
            .iter()
            .filter(|o| target.contains(o.date))
            .map(MonthObservation::from)
            .collect())
    }

    fn check_year(&self, year: i32) -> Result<(), InvalidRangeError> {
        match self.year_span() {
            None => Err(InvalidRangeError::EmptyHistory { year }),
            Some((first, last)) if year < first || year > last => {
                Err(InvalidRangeError::YearOutsideHistory { year, first, last })
            }
            Some(_) => Ok(()),
        }
    }
}
