//! Reads the ACIS `StnData` CSV output into an [`ObservationHistory`].
//!
//! The first line of the payload is the station name, followed by one line per
//! day: `date,maxt,mint,pcpn,snow,snwd`. Values may be flags such as `M`
//! (missing) or `T` (trace) and are read as null.

use crate::acis::error::AcisError;
use crate::error::MalformedDateError;
use crate::observations::history::ObservationHistory;
use crate::types::observation::DailyObservation;
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const COL_DATE: &str = "date";
const COL_MAXT: &str = "max_temp";
const COL_MINT: &str = "min_temp";
const COL_PCPN: &str = "precipitation";
const COL_SNOW: &str = "snow";
const COL_SNWD: &str = "snow_depth";

const SCHEMA: [&str; 6] = [COL_DATE, COL_MAXT, COL_MINT, COL_PCPN, COL_SNOW, COL_SNWD];
const VALUE_COLUMNS: [&str; 5] = [COL_MAXT, COL_MINT, COL_PCPN, COL_SNOW, COL_SNWD];

fn get_column<'a>(df: &'a DataFrame, col: &str) -> Result<&'a Column, AcisError> {
    df.column(col)
        .map_err(|e| AcisError::ColumnNotFound(col.to_string(), e))
}

fn get_opt_float(series: &Column, idx: usize) -> Option<f64> {
    series.f64().ok().and_then(|ca| ca.get(idx))
}

impl ObservationHistory {
    /// Parses an ACIS `StnData` CSV payload (`output=csv`).
    pub fn from_acis_csv(bytes: &[u8], station: &str) -> Result<Self, AcisError> {
        csv_to_history(bytes, station)
    }
}

/// Parses raw CSV bytes. Blocking; run it off the async executor.
pub(crate) fn csv_to_history(bytes: &[u8], station: &str) -> Result<ObservationHistory, AcisError> {
    let io_err = |source| AcisError::CsvReadIo {
        station: station.to_string(),
        source,
    };
    let polars_err = |source| AcisError::CsvReadPolars {
        station: station.to_string(),
        source,
    };

    // Only the station name line: the station has no observations.
    if bytes.split(|b| *b == b'\n').filter(|l| !l.is_empty()).count() <= 1 {
        warn!("No observation rows in CSV for station {}", station);
        return Ok(ObservationHistory::default());
    }

    let mut temp_file = NamedTempFile::new().map_err(io_err)?;
    temp_file.write_all(bytes).map_err(io_err)?;
    temp_file.flush().map_err(io_err)?;

    // Every column is read as text so flags survive until the numeric cast.
    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .with_skip_rows(1)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
        .map_err(polars_err)?
        .finish()
        .map_err(polars_err)?;

    if df.width() != SCHEMA.len() {
        warn!(
            "CSV column count ({}) does not match schema length ({}) for station {}",
            df.width(),
            SCHEMA.len(),
            station
        );
        return Err(AcisError::SchemaMismatch {
            station: station.to_string(),
            expected: SCHEMA.len(),
            found: df.width(),
        });
    }

    df.set_column_names(SCHEMA.iter().copied())
        .map_err(polars_err)?;

    let df = df
        .lazy()
        .with_columns(
            VALUE_COLUMNS
                .iter()
                .map(|name| col(*name).cast(DataType::Float64))
                .collect::<Vec<_>>(),
        )
        .collect()
        .map_err(polars_err)?;

    let history = frame_to_history(&df)?;
    info!(
        "Loaded {} observations for station {} ({} rows rejected)",
        history.len(),
        station,
        history.rejected().len()
    );
    Ok(history)
}

fn frame_to_history(df: &DataFrame) -> Result<ObservationHistory, AcisError> {
    let dates = get_column(df, COL_DATE)?;
    let dates = dates
        .str()
        .map_err(|e| AcisError::ColumnNotFound(COL_DATE.to_string(), e))?;
    let max_temp = get_column(df, COL_MAXT)?;
    let min_temp = get_column(df, COL_MINT)?;
    let precipitation = get_column(df, COL_PCPN)?;
    let snow = get_column(df, COL_SNOW)?;
    let snow_depth = get_column(df, COL_SNWD)?;

    let mut observations = Vec::with_capacity(df.height());
    let mut rejected = Vec::new();

    for idx in 0..df.height() {
        let raw_date = dates.get(idx).unwrap_or_default();
        let date = match NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(source) => {
                warn!("Skipping observation row {} with date '{}'", idx, raw_date);
                rejected.push(MalformedDateError::Date {
                    input: raw_date.to_string(),
                    source,
                });
                continue;
            }
        };
        observations.push(DailyObservation {
            date,
            max_temp: get_opt_float(max_temp, idx),
            min_temp: get_opt_float(min_temp, idx),
            precipitation: get_opt_float(precipitation, idx),
            snow: get_opt_float(snow, idx),
            snow_depth: get_opt_float(snow_depth, idx),
        });
    }

    Ok(ObservationHistory::new(observations).with_rejected(rejected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const SAMPLE: &str = "DALLAS-FORT WORTH AREA\n\
        2020-06-01,95,74,0.00,0.0,0\n\
        2020-06-02,97,76,T,0.0,0\n\
        2020-06-03,M,75,1.25,M,M\n\
        20XX-06-04,90,70,0.00,0.0,0\n\
        2021-06-01,88,69,0.10,0.0,0\n";

    #[test]
    fn test_csv_flags_become_null() -> Result<(), AcisError> {
        let history = csv_to_history(SAMPLE.as_bytes(), "DFWthr")?;
        let obs = history.observations();

        assert_eq!(obs.len(), 4);
        assert_eq!(obs[0].max_temp, Some(95.0));
        assert_eq!(obs[0].precipitation, Some(0.0));
        assert_eq!(obs[1].precipitation, None);
        assert_eq!(obs[2].max_temp, None);
        assert_eq!(obs[2].precipitation, Some(1.25));
        assert_eq!(obs[2].snow_depth, None);
        assert_eq!(obs[3].date.year(), 2021);
        Ok(())
    }

    #[test]
    fn test_csv_malformed_date_is_rejected_not_fatal() -> Result<(), AcisError> {
        let history = csv_to_history(SAMPLE.as_bytes(), "DFWthr")?;
        assert_eq!(history.rejected().len(), 1);
        assert_eq!(history.rejected()[0].input(), "20XX-06-04");
        Ok(())
    }

    #[test]
    fn test_csv_header_only_is_empty_history() -> Result<(), AcisError> {
        let history = csv_to_history(b"FAIRBANKS AREA\n", "FAIthr")?;
        assert!(history.is_empty());
        Ok(())
    }

    #[test]
    fn test_csv_wrong_width_is_schema_mismatch() {
        let result = csv_to_history(b"STATION\n2020-01-01,1,2\n2020-01-02,3,4\n", "X");
        assert!(matches!(
            result,
            Err(AcisError::SchemaMismatch {
                expected: 6,
                found: 3,
                ..
            })
        ));
    }
}
