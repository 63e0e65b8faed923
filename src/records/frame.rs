//! Tabular views of merged records for display layers.

use crate::records::merger::{MergedRecords, MergedRecordsRow};
use crate::types::calendar::MonthOfYear;
use crate::types::metric::RecordMetric;
use crate::ClimateError;
use polars::prelude::*;

const COL_DAY_KEY: &str = "day_key";
const COL_MONTH: &str = "month";
const COL_DAY: &str = "day";

/// Builds a DataFrame with `day_key`, `month`, `day`, then a value column and a
/// `year_` column per metric. Absent and value-less records are null.
pub fn records_to_frame<'a>(
    rows: impl IntoIterator<Item = &'a MergedRecordsRow>,
) -> PolarsResult<DataFrame> {
    let rows: Vec<&MergedRecordsRow> = rows.into_iter().collect();

    let mut columns: Vec<Column> = vec![
        Series::new(
            COL_DAY_KEY.into(),
            rows.iter().map(|r| r.day_key.to_string()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            COL_MONTH.into(),
            rows.iter().map(|r| r.month).collect::<Vec<u32>>(),
        )
        .into(),
        Series::new(
            COL_DAY.into(),
            rows.iter().map(|r| r.day).collect::<Vec<u32>>(),
        )
        .into(),
    ];

    for metric in RecordMetric::ALL {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.get(metric).value()).collect();
        let years: Vec<Option<i32>> = rows.iter().map(|r| r.get(metric).year()).collect();
        columns.push(Series::new(metric.column_name().into(), values).into());
        columns.push(Series::new(metric.year_column_name().into(), years).into());
    }

    DataFrame::new(columns)
}

impl MergedRecords {
    /// The full table as a DataFrame, ordered by calendar day.
    pub fn to_frame(&self) -> Result<DataFrame, ClimateError> {
        Ok(records_to_frame(self.rows())?)
    }

    /// One month of records as a DataFrame, ordered by day.
    pub fn month_frame(&self, month: u32) -> Result<DataFrame, ClimateError> {
        let month = MonthOfYear::new(month)?;
        Ok(records_to_frame(self.records_in(month))?)
    }
}
