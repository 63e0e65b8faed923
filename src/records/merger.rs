use crate::error::InvalidRangeError;
use crate::records::normalizer::NormalizedSeries;
use crate::types::calendar::{DayKey, MonthOfYear};
use crate::types::metric::{MetricConfig, RecordMetric, Reduce};
use crate::types::record::{Extreme, NormalizedRecordRow};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// All six records for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecordsRow {
    pub day_key: DayKey,
    pub month: u32,
    pub day: u32,
    pub high_max_temp: Extreme,
    pub low_min_temp: Extreme,
    pub high_precip: Extreme,
    pub high_snow: Extreme,
    pub low_max_temp: Extreme,
    pub high_min_temp: Extreme,
}

impl MergedRecordsRow {
    fn empty(day_key: DayKey) -> Self {
        Self {
            day_key,
            month: day_key.month(),
            day: day_key.day(),
            high_max_temp: Extreme::Absent,
            low_min_temp: Extreme::Absent,
            high_precip: Extreme::Absent,
            high_snow: Extreme::Absent,
            low_max_temp: Extreme::Absent,
            high_min_temp: Extreme::Absent,
        }
    }

    pub fn get(&self, metric: RecordMetric) -> Extreme {
        match metric {
            RecordMetric::HighMaxTemp => self.high_max_temp,
            RecordMetric::LowMinTemp => self.low_min_temp,
            RecordMetric::HighPrecip => self.high_precip,
            RecordMetric::HighSnow => self.high_snow,
            RecordMetric::LowMaxTemp => self.low_max_temp,
            RecordMetric::HighMinTemp => self.high_min_temp,
        }
    }

    fn slot_mut(&mut self, metric: RecordMetric) -> &mut Extreme {
        match metric {
            RecordMetric::HighMaxTemp => &mut self.high_max_temp,
            RecordMetric::LowMinTemp => &mut self.low_min_temp,
            RecordMetric::HighPrecip => &mut self.high_precip,
            RecordMetric::HighSnow => &mut self.high_snow,
            RecordMetric::LowMaxTemp => &mut self.low_max_temp,
            RecordMetric::HighMinTemp => &mut self.high_min_temp,
        }
    }
}

/// The most extreme value of one metric across every calendar day, and the
/// days (with years) on which it was reached, ordered by day then year.
#[derive(Debug, Clone, PartialEq)]
pub struct AllTimeRecord {
    pub metric: RecordMetric,
    pub value: f64,
    pub occurrences: Vec<(DayKey, i32)>,
}

impl AllTimeRecord {
    /// `None` when no row carries a value.
    pub(crate) fn from_rows<'a>(
        metric: RecordMetric,
        reduce: Reduce,
        rows: impl IntoIterator<Item = &'a NormalizedRecordRow>,
    ) -> Option<Self> {
        let values: Vec<(f64, DayKey, i32)> = rows
            .into_iter()
            .filter_map(|row| Some((row.value().as_option()?, row.key(), row.year())))
            .collect();
        let best = values
            .iter()
            .map(|(value, ..)| *value)
            .max_by(|a, b| reduce.compare(*a, *b))?;

        let mut occurrences: Vec<(DayKey, i32)> = values
            .iter()
            .filter(|(value, ..)| reduce.compare(*value, best) == Ordering::Equal)
            .map(|(_, key, year)| (*key, *year))
            .collect();
        occurrences.sort();
        occurrences.dedup();

        Some(Self {
            metric,
            value: best,
            occurrences,
        })
    }
}

/// Records table keyed by calendar day, at most one row per `MM-DD`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecords {
    rows: BTreeMap<DayKey, MergedRecordsRow>,
    all_time: BTreeMap<RecordMetric, AllTimeRecord>,
    config: MetricConfig,
}

impl MergedRecords {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &MergedRecordsRow> {
        self.rows.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DayKey> {
        self.rows.keys()
    }

    pub fn config(&self) -> &MetricConfig {
        &self.config
    }

    /// Rows of one calendar month, in ascending day order.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRangeError::Month`] when `month` is outside 1-12.
    pub fn records_for_month(
        &self,
        month: u32,
    ) -> Result<Vec<&MergedRecordsRow>, InvalidRangeError> {
        let month = MonthOfYear::new(month)?;
        Ok(self.records_in(month).collect())
    }

    pub fn records_in(&self, month: MonthOfYear) -> impl Iterator<Item = &MergedRecordsRow> {
        self.rows
            .values()
            .filter(move |row| row.month == month.get())
    }

    pub fn records_for_day(&self, key: DayKey) -> Option<&MergedRecordsRow> {
        self.rows.get(&key)
    }

    /// The all-time record of `metric`, using the metric's configured reduce
    /// direction. Taken from every normalized entry, so years tied on the same
    /// calendar day are all listed. `None` when no entry carries a value.
    pub fn all_time(&self, metric: RecordMetric) -> Option<&AllTimeRecord> {
        self.all_time.get(&metric)
    }
}

/// Full outer join of normalized series on the calendar-day key.
pub struct RecordsMerger {
    config: MetricConfig,
}

impl Default for RecordsMerger {
    fn default() -> Self {
        Self::new(MetricConfig::default())
    }
}

impl RecordsMerger {
    pub fn new(config: MetricConfig) -> Self {
        Self { config }
    }

    /// Merges the series into one table. Every key present in any series gets
    /// a row; metrics without an entry for that key stay [`Extreme::Absent`].
    ///
    /// Two entries of the same metric on one key keep the more extreme value
    /// (per the configured reduce direction), then the later year.
    pub fn merge(&self, series: &[NormalizedSeries]) -> MergedRecords {
        let mut rows: BTreeMap<DayKey, MergedRecordsRow> = BTreeMap::new();

        for s in series {
            let reduce = self.config.reduce_for(s.metric);
            for record in &s.rows {
                let row = rows
                    .entry(record.key())
                    .or_insert_with(|| MergedRecordsRow::empty(record.key()));
                let slot = row.slot_mut(s.metric);
                if !slot.is_absent() {
                    debug!(
                        "{} has more than one entry for {}, keeping the more extreme",
                        s.metric,
                        record.key()
                    );
                }
                *slot = prefer(reduce, *slot, record.extreme());
            }
        }

        let all_time = RecordMetric::ALL
            .iter()
            .filter_map(|metric| {
                let rows = series
                    .iter()
                    .filter(|s| s.metric == *metric)
                    .flat_map(|s| s.rows.iter());
                let reduce = self.config.reduce_for(*metric);
                Some((*metric, AllTimeRecord::from_rows(*metric, reduce, rows)?))
            })
            .collect();

        debug!(
            "Merged {} series into {} calendar days",
            series.len(),
            rows.len()
        );

        MergedRecords {
            rows,
            all_time,
            config: self.config.clone(),
        }
    }
}

fn prefer(reduce: Reduce, current: Extreme, candidate: Extreme) -> Extreme {
    match (current, candidate) {
        (Extreme::Absent, c) => c,
        (c, Extreme::Absent) => c,
        (Extreme::Recorded(_), Extreme::NoValue { .. }) => current,
        (Extreme::NoValue { .. }, Extreme::Recorded(_)) => candidate,
        (Extreme::NoValue { year: a }, Extreme::NoValue { year: b }) => {
            if b > a {
                candidate
            } else {
                current
            }
        }
        (Extreme::Recorded(a), Extreme::Recorded(b)) => match reduce.compare(b.value, a.value) {
            Ordering::Greater => candidate,
            Ordering::Less => current,
            Ordering::Equal if b.year > a.year => candidate,
            Ordering::Equal => current,
        },
    }
}
