use crate::error::MalformedDateError;
use crate::records::merger::AllTimeRecord;
use crate::types::metric::{RecordMetric, Reduce};
use crate::types::record::{NormalizedRecordRow, RawExtremeEntry, RecordValue};
use chrono::NaiveDate;
use log::{debug, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output of normalizing one extreme series.
///
/// `rejected` holds the entries whose occurrence date did not parse; they are
/// not represented in `rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub metric: RecordMetric,
    pub rows: Vec<NormalizedRecordRow>,
    pub rejected: Vec<MalformedDateError>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most extreme value of the series with every entry that reached it,
    /// including entries of different years on the same calendar day.
    pub fn all_time(&self, reduce: Reduce) -> Option<AllTimeRecord> {
        AllTimeRecord::from_rows(self.metric, reduce, &self.rows)
    }
}

/// Turns raw (value, date) pairs into rows keyed by calendar day.
pub struct RecordSeriesNormalizer;

impl RecordSeriesNormalizer {
    /// Normalizes a single entry. The value is coerced, the date must parse.
    pub fn normalize_entry(
        entry: &RawExtremeEntry,
    ) -> Result<NormalizedRecordRow, MalformedDateError> {
        let input = entry.occurrence_date.trim();
        let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|source| {
            MalformedDateError::Date {
                input: entry.occurrence_date.clone(),
                source,
            }
        })?;
        Ok(NormalizedRecordRow::new(
            RecordValue::coerce(&entry.value),
            date,
        ))
    }

    /// Normalizes a whole series. Entries with malformed dates are logged and
    /// skipped; the rest of the batch is unaffected.
    pub fn normalize(metric: RecordMetric, entries: &[RawExtremeEntry]) -> NormalizedSeries {
        let mut rows = Vec::with_capacity(entries.len());
        let mut rejected = Vec::new();

        for entry in entries {
            match Self::normalize_entry(entry) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    warn!("Skipping {} entry: {}", metric, e);
                    rejected.push(e);
                }
            }
        }

        debug!(
            "Normalized {} series: {} rows, {} rejected",
            metric,
            rows.len(),
            rejected.len()
        );

        NormalizedSeries {
            metric,
            rows,
            rejected,
        }
    }
}
