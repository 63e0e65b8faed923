use crate::types::observation::MonthObservation;
use chrono::NaiveDate;
use polars::prelude::*;

/// Builds the month table shown next to the chart: the date, its day of month
/// and the five observed values.
pub fn month_to_frame(rows: &[MonthObservation]) -> PolarsResult<DataFrame> {
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.observation.date).collect();
    let days: Vec<u32> = rows.iter().map(|r| r.day_of_month).collect();
    let values = |f: fn(&MonthObservation) -> Option<f64>| -> Vec<Option<f64>> {
        rows.iter().map(f).collect()
    };

    DataFrame::new(vec![
        Series::new("date".into(), dates).into(),
        Series::new("day_of_month".into(), days).into(),
        Series::new("max_temp".into(), values(|r| r.observation.max_temp)).into(),
        Series::new("min_temp".into(), values(|r| r.observation.min_temp)).into(),
        Series::new("precipitation".into(), values(|r| r.observation.precipitation)).into(),
        Series::new("snow".into(), values(|r| r.observation.snow)).into(),
        Series::new("snow_depth".into(), values(|r| r.observation.snow_depth)).into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observations::history::ObservationHistory;
    use crate::types::observation::DailyObservation;

    #[test]
    fn test_month_frame_schema() -> Result<(), Box<dyn std::error::Error>> {
        let history = ObservationHistory::new(vec![
            DailyObservation {
                max_temp: Some(33.0),
                snow: Some(2.5),
                ..DailyObservation::empty(NaiveDate::from_ymd_opt(2019, 1, 2).unwrap())
            },
            DailyObservation::empty(NaiveDate::from_ymd_opt(2019, 1, 3).unwrap()),
        ]);
        let df = month_to_frame(&history.for_month(2019, 1)?)?;

        assert_eq!(df.shape(), (2, 7));
        assert_eq!(df.column("date")?.dtype(), &DataType::Date);
        assert_eq!(df.column("day_of_month")?.u32()?.get(1), Some(3));
        assert_eq!(df.column("max_temp")?.f64()?.get(0), Some(33.0));
        assert_eq!(df.column("max_temp")?.f64()?.get(1), None);
        assert_eq!(df.column("snow")?.f64()?.get(0), Some(2.5));
        Ok(())
    }

    #[test]
    fn test_empty_month_gives_empty_frame() -> Result<(), Box<dyn std::error::Error>> {
        let df = month_to_frame(&[])?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 7);
        Ok(())
    }
}
