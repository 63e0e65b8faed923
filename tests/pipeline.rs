use climate_records::{
    parse_records_response, DayKey, Extreme, InvalidRangeError, MetricConfig, ObservationHistory,
    RecordMetric, StationClimate, YearValue,
};

const RECORDS_JSON: &str = include_str!("fixtures/dfw_records.json");
const OBSERVATIONS_CSV: &str = include_str!("fixtures/dfw_observations.csv");

fn load() -> Result<StationClimate, Box<dyn std::error::Error>> {
    let config = MetricConfig::default();
    let history = ObservationHistory::from_acis_csv(OBSERVATIONS_CSV.as_bytes(), "DFWthr")?;
    let raw = parse_records_response(RECORDS_JSON, "DFWthr", &config)?;
    Ok(StationClimate::build("DFWthr", history, &raw, config))
}

fn key(s: &str) -> DayKey {
    s.parse().unwrap()
}

#[test]
fn test_merged_table_covers_union_of_days() -> Result<(), Box<dyn std::error::Error>> {
    let climate = load()?;
    let keys: Vec<String> = climate.records().keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, ["02-28", "02-29", "03-01", "07-04", "07-05"]);

    // 1899-02-29 is not a date; only that entry is lost.
    assert_eq!(climate.rejected_records().len(), 1);
    assert_eq!(climate.rejected_records()[0].0, RecordMetric::LowMinTemp);
    Ok(())
}

#[test]
fn test_independence_day_row_has_all_six_records() -> Result<(), Box<dyn std::error::Error>> {
    let climate = load()?;
    let row = climate.records().records_for_day(key("07-04")).unwrap();

    assert_eq!(row.high_max_temp.recorded(), Some(YearValue { value: 102.0, year: 1980 }));
    assert_eq!(row.low_min_temp.recorded(), Some(YearValue { value: 67.0, year: 1902 }));
    assert_eq!(row.high_precip.value(), Some(3.61));
    // A zero is a real record, not a missing one.
    assert_eq!(row.high_snow.recorded(), Some(YearValue { value: 0.0, year: 1899 }));
    assert_eq!(row.low_max_temp.value(), Some(74.0));
    assert_eq!(row.high_min_temp.year(), Some(1998));
    Ok(())
}

#[test]
fn test_partial_coverage_keeps_rows_with_absent_metrics(
) -> Result<(), Box<dyn std::error::Error>> {
    let climate = load()?;

    let leap = climate.records().records_for_day(key("02-29")).unwrap();
    assert_eq!(leap.high_max_temp.value(), Some(84.0));
    assert_eq!(leap.high_min_temp.value(), Some(61.0));
    assert_eq!(leap.low_min_temp, Extreme::Absent);
    assert_eq!(leap.high_precip, Extreme::Absent);

    let march = climate.records().records_for_day(key("03-01")).unwrap();
    assert_eq!(march.high_max_temp, Extreme::NoValue { year: 1899 });
    assert_eq!(march.high_min_temp, Extreme::NoValue { year: 2011 });
    assert_eq!(march.low_min_temp, Extreme::Absent);
    assert_eq!(march.high_snow.value(), Some(2.0));
    Ok(())
}

#[test]
fn test_month_queries() -> Result<(), Box<dyn std::error::Error>> {
    let climate = load()?;
    let records = climate.records();

    let feb: Vec<u32> = records.records_for_month(2)?.iter().map(|r| r.day).collect();
    assert_eq!(feb, vec![28, 29]);
    assert!(records.records_for_month(12)?.is_empty());
    assert_eq!(records.records_for_month(0).unwrap_err(), InvalidRangeError::Month(0));

    let all_time = records.all_time(RecordMetric::HighMaxTemp).unwrap();
    assert_eq!(all_time.value, 103.0);
    assert_eq!(all_time.occurrences, vec![(key("07-05"), 1980)]);
    Ok(())
}

#[test]
fn test_observation_month_views() -> Result<(), Box<dyn std::error::Error>> {
    let climate = load()?;
    assert_eq!(climate.history().year_span(), Some((2019, 2021)));

    let feb_2020 = climate.month_view(2020, 2)?;
    let days: Vec<u32> = feb_2020.observations.iter().map(|o| o.day_of_month).collect();
    assert_eq!(days, vec![28, 29]);
    assert_eq!(feb_2020.observations[1].observation.precipitation, None);
    assert_eq!(feb_2020.records.len(), 2);

    let feb_2021 = climate.month_view(2021, 2)?;
    assert_eq!(feb_2021.observations[0].observation.min_temp, Some(-2.0));
    assert_eq!(feb_2021.observations[0].observation.snow_depth, Some(4.0));

    assert!(climate.month_view(2020, 6)?.observations.is_empty());
    assert!(matches!(
        climate.month_view(2018, 1),
        Err(InvalidRangeError::YearOutsideHistory { year: 2018, first: 2019, last: 2021 })
    ));
    Ok(())
}

#[test]
fn test_rebuilding_from_the_same_input_is_identical() -> Result<(), Box<dyn std::error::Error>> {
    let a = load()?;
    let b = load()?;
    assert_eq!(a.records(), b.records());
    assert_eq!(a.history(), b.history());
    Ok(())
}
