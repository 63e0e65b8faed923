use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One day of observed weather at a station. Missing or non-numeric
/// source values are `None`.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyObservation {
    pub date: NaiveDate,            // Date
    pub max_temp: Option<f64>,      // MaxT (F)
    pub min_temp: Option<f64>,      // MinT (F)
    pub precipitation: Option<f64>, // Precip (in)
    pub snow: Option<f64>,          // Snow (in)
    pub snow_depth: Option<f64>,    // SnowDepth (in)
}

impl DailyObservation {
    /// An observation for `date` with every value missing.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            max_temp: None,
            min_temp: None,
            precipitation: None,
            snow: None,
            snow_depth: None,
        }
    }
}

/// An observation selected for a month view, positioned on a day-of-month axis.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthObservation {
    #[serde(flatten)]
    pub observation: DailyObservation,
    pub day_of_month: u32,
}

impl From<&DailyObservation> for MonthObservation {
    fn from(observation: &DailyObservation) -> Self {
        Self {
            day_of_month: observation.date.day(),
            observation: observation.clone(),
        }
    }
}
