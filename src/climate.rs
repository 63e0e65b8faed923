//! One station load: the observation history and the merged daily records,
//! derived together and queried per month.

use crate::acis::response::RawRecordSeries;
use crate::error::{InvalidRangeError, MalformedDateError};
use crate::observations::frame::month_to_frame;
use crate::observations::history::ObservationHistory;
use crate::records::frame::records_to_frame;
use crate::records::merger::{MergedRecords, MergedRecordsRow, RecordsMerger};
use crate::records::normalizer::RecordSeriesNormalizer;
use crate::types::calendar::YearMonth;
use crate::types::metric::{MetricConfig, RecordMetric};
use crate::types::observation::MonthObservation;
use crate::ClimateError;
use log::info;
use polars::prelude::DataFrame;

/// Everything derived from one station selection.
///
/// Rebuilt from scratch whenever the station changes; never updated in place.
#[derive(Debug, Clone)]
pub struct StationClimate {
    station: String,
    history: ObservationHistory,
    records: MergedRecords,
    rejected_records: Vec<(RecordMetric, MalformedDateError)>,
}

impl StationClimate {
    /// Normalizes the raw record series, merges them and pairs the result with
    /// the observation history.
    pub fn build(
        station: &str,
        history: ObservationHistory,
        raw_records: &[RawRecordSeries],
        config: MetricConfig,
    ) -> Self {
        let normalized: Vec<_> = raw_records
            .iter()
            .map(|raw| RecordSeriesNormalizer::normalize(raw.metric, &raw.entries))
            .collect();

        let rejected_records = normalized
            .iter()
            .flat_map(|s| s.rejected.iter().map(move |e| (s.metric, e.clone())))
            .collect();

        let records = RecordsMerger::new(config).merge(&normalized);
        info!(
            "Built climate for station {}: {} observations, {} record days",
            station,
            history.len(),
            records.len()
        );

        Self {
            station: station.to_string(),
            history,
            records,
            rejected_records,
        }
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    pub fn records(&self) -> &MergedRecords {
        &self.records
    }

    /// Record entries dropped during normalization because of a bad date.
    pub fn rejected_records(&self) -> &[(RecordMetric, MalformedDateError)] {
        &self.rejected_records
    }

    /// Observations of `year`/`month` next to that month's daily records.
    pub fn month_view(&self, year: i32, month: u32) -> Result<MonthView<'_>, InvalidRangeError> {
        let period = YearMonth::new(year, month)?;
        Ok(MonthView {
            period,
            observations: self.history.for_year_month(period)?,
            records: self.records.records_in(period.month()).collect(),
        })
    }

    /// The view a browser opens on: the most recent month with observations.
    pub fn latest_month_view(&self) -> Option<MonthView<'_>> {
        let period = self.history.latest_month()?;
        self.month_view(period.year(), period.month().get()).ok()
    }
}

/// One month of observations and the records of the same calendar month.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub period: YearMonth,
    pub observations: Vec<MonthObservation>,
    pub records: Vec<&'a MergedRecordsRow>,
}

impl MonthView<'_> {
    pub fn title(&self, station_name: &str) -> String {
        format!(
            "{} Daily Temperatures and Precipitation for {}",
            station_name, self.period
        )
    }

    pub fn observations_frame(&self) -> Result<DataFrame, ClimateError> {
        Ok(month_to_frame(&self.observations)?)
    }

    pub fn records_frame(&self) -> Result<DataFrame, ClimateError> {
        Ok(records_to_frame(self.records.iter().copied())?)
    }
}
