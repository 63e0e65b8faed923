//! Defines the six daily-record metrics and how each one is requested from ACIS.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// One of the six daily climate records tracked per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordMetric {
    /// Highest maximum temperature.
    HighMaxTemp,
    /// Lowest minimum temperature.
    LowMinTemp,
    /// Greatest daily precipitation.
    HighPrecip,
    /// Greatest daily snowfall.
    HighSnow,
    /// Lowest maximum temperature ("coldest high").
    LowMaxTemp,
    /// Highest minimum temperature ("warmest low").
    HighMinTemp,
}

impl RecordMetric {
    /// All metrics, in the order ACIS returns their summaries by default.
    pub const ALL: [RecordMetric; 6] = [
        RecordMetric::HighMaxTemp,
        RecordMetric::LowMinTemp,
        RecordMetric::HighPrecip,
        RecordMetric::HighSnow,
        RecordMetric::LowMaxTemp,
        RecordMetric::HighMinTemp,
    ];

    /// Short label used in tables and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            RecordMetric::HighMaxTemp => "HighMaxT",
            RecordMetric::LowMinTemp => "LowMinT",
            RecordMetric::HighPrecip => "HighPCPN",
            RecordMetric::HighSnow => "HighSnow",
            RecordMetric::LowMaxTemp => "LowMaxT",
            RecordMetric::HighMinTemp => "HighMinT",
        }
    }

    pub(crate) fn column_name(&self) -> &'static str {
        match self {
            RecordMetric::HighMaxTemp => "high_max_temp",
            RecordMetric::LowMinTemp => "low_min_temp",
            RecordMetric::HighPrecip => "high_precip",
            RecordMetric::HighSnow => "high_snow",
            RecordMetric::LowMaxTemp => "low_max_temp",
            RecordMetric::HighMinTemp => "high_min_temp",
        }
    }

    pub(crate) fn year_column_name(&self) -> String {
        format!("year_{}", self.column_name())
    }

    /// Observed element the record is computed from.
    pub fn element(&self) -> Element {
        match self {
            RecordMetric::HighMaxTemp | RecordMetric::LowMaxTemp => Element::MaxTemp,
            RecordMetric::LowMinTemp | RecordMetric::HighMinTemp => Element::MinTemp,
            RecordMetric::HighPrecip => Element::Precip,
            RecordMetric::HighSnow => Element::Snow,
        }
    }

    /// Reduction implied by the metric's name.
    pub fn default_reduce(&self) -> Reduce {
        match self {
            RecordMetric::HighMaxTemp
            | RecordMetric::HighPrecip
            | RecordMetric::HighSnow
            | RecordMetric::HighMinTemp => Reduce::Max,
            RecordMetric::LowMinTemp | RecordMetric::LowMaxTemp => Reduce::Min,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            RecordMetric::HighMaxTemp => 0,
            RecordMetric::LowMinTemp => 1,
            RecordMetric::HighPrecip => 2,
            RecordMetric::HighSnow => 3,
            RecordMetric::LowMaxTemp => 4,
            RecordMetric::HighMinTemp => 5,
        }
    }
}

impl fmt::Display for RecordMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// ACIS daily element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    #[serde(rename = "maxt")]
    MaxTemp,
    #[serde(rename = "mint")]
    MinTemp,
    #[serde(rename = "pcpn")]
    Precip,
    Snow,
}

/// Direction in which a record is "more extreme".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduce {
    Max,
    Min,
}

impl Reduce {
    /// Orders two values so that the more extreme one compares greater.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match self {
            Reduce::Max => a.total_cmp(&b),
            Reduce::Min => b.total_cmp(&a),
        }
    }
}

/// How one metric is requested: which element, reduced in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub metric: RecordMetric,
    pub element: Element,
    pub reduce: Reduce,
}

impl MetricSpec {
    pub fn for_metric(metric: RecordMetric) -> Self {
        Self {
            metric,
            element: metric.element(),
            reduce: metric.default_reduce(),
        }
    }
}

/// A metric list that does not name every metric exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricConfigError {
    #[error("Expected {expected} metric specs, found {found}")]
    Count { expected: usize, found: usize },

    #[error("Metric {0} is configured more than once")]
    Duplicate(RecordMetric),
}

/// Request configuration for all six metrics.
///
/// Always holds exactly one spec per metric, in [`RecordMetric::ALL`] order,
/// which is also the order of the summaries in the ACIS response. Serialized
/// as a plain list; deserializing accepts any order and rejects lists that
/// miss or repeat a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MetricSpec>", into = "Vec<MetricSpec>")]
pub struct MetricConfig {
    specs: [MetricSpec; 6],
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            specs: RecordMetric::ALL.map(MetricSpec::for_metric),
        }
    }
}

impl TryFrom<Vec<MetricSpec>> for MetricConfig {
    type Error = MetricConfigError;

    fn try_from(specs: Vec<MetricSpec>) -> Result<Self, Self::Error> {
        let mut config = MetricConfig::default();
        if specs.len() != config.specs.len() {
            return Err(MetricConfigError::Count {
                expected: config.specs.len(),
                found: specs.len(),
            });
        }

        let mut seen = [false; 6];
        for spec in specs {
            let idx = spec.metric.index();
            if seen[idx] {
                return Err(MetricConfigError::Duplicate(spec.metric));
            }
            seen[idx] = true;
            config.specs[idx] = MetricSpec {
                metric: spec.metric,
                element: spec.metric.element(),
                reduce: spec.reduce,
            };
        }
        Ok(config)
    }
}

impl From<MetricConfig> for Vec<MetricSpec> {
    fn from(config: MetricConfig) -> Self {
        config.specs.to_vec()
    }
}

impl MetricConfig {
    /// Overrides the reduce direction of one metric.
    pub fn with_reduce(mut self, metric: RecordMetric, reduce: Reduce) -> Self {
        self.specs[metric.index()].reduce = reduce;
        self
    }

    pub fn reduce_for(&self, metric: RecordMetric) -> Reduce {
        self.specs[metric.index()].reduce
    }

    pub fn specs(&self) -> &[MetricSpec] {
        &self.specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_follows_metric_names() {
        let config = MetricConfig::default();
        assert_eq!(config.reduce_for(RecordMetric::LowMaxTemp), Reduce::Min);
        assert_eq!(config.reduce_for(RecordMetric::HighMinTemp), Reduce::Max);
        assert_eq!(config.specs()[4].element, Element::MaxTemp);
        assert_eq!(config.specs()[5].element, Element::MinTemp);
        for (i, spec) in config.specs().iter().enumerate() {
            assert_eq!(spec.metric.index(), i);
        }
    }

    #[test]
    fn test_with_reduce_only_touches_one_metric() {
        let config = MetricConfig::default().with_reduce(RecordMetric::LowMaxTemp, Reduce::Max);
        assert_eq!(config.reduce_for(RecordMetric::LowMaxTemp), Reduce::Max);
        assert_eq!(config.reduce_for(RecordMetric::LowMinTemp), Reduce::Min);
    }

    #[test]
    fn test_reduce_compare_prefers_extreme() {
        assert_eq!(Reduce::Max.compare(5.0, 3.0), Ordering::Greater);
        assert_eq!(Reduce::Min.compare(5.0, 3.0), Ordering::Less);
        assert_eq!(Reduce::Min.compare(-4.0, -4.0), Ordering::Equal);
    }

    #[test]
    fn test_element_serializes_to_acis_name() -> Result<(), serde_json::Error> {
        let names: Vec<String> = RecordMetric::ALL
            .iter()
            .map(|m| serde_json::to_string(&m.element()))
            .collect::<Result<_, _>>()?;
        assert_eq!(
            names,
            ["\"maxt\"", "\"mint\"", "\"pcpn\"", "\"snow\"", "\"maxt\"", "\"mint\""]
        );
        Ok(())
    }

    #[test]
    fn test_deserialized_config_is_reordered_by_metric() -> Result<(), serde_json::Error> {
        let mut specs: Vec<MetricSpec> = MetricConfig::default().into();
        specs.swap(0, 1);
        let json = serde_json::to_string(&specs)?;

        let config: MetricConfig = serde_json::from_str(&json)?;
        assert_eq!(config, MetricConfig::default());
        assert_eq!(config.reduce_for(RecordMetric::HighMaxTemp), Reduce::Max);
        assert_eq!(config.reduce_for(RecordMetric::LowMinTemp), Reduce::Min);
        assert_eq!(config.specs()[0].metric, RecordMetric::HighMaxTemp);
        Ok(())
    }

    #[test]
    fn test_config_round_trips_through_json() -> Result<(), serde_json::Error> {
        let config = MetricConfig::default().with_reduce(RecordMetric::HighMinTemp, Reduce::Min);
        let back: MetricConfig = serde_json::from_str(&serde_json::to_string(&config)?)?;
        assert_eq!(back, config);
        Ok(())
    }

    #[test]
    fn test_config_with_missing_or_repeated_metric_is_rejected() {
        let mut specs: Vec<MetricSpec> = MetricConfig::default().into();
        specs[1] = specs[0];
        assert_eq!(
            MetricConfig::try_from(specs.clone()),
            Err(MetricConfigError::Duplicate(RecordMetric::HighMaxTemp))
        );

        specs.pop();
        assert_eq!(
            MetricConfig::try_from(specs),
            Err(MetricConfigError::Count {
                expected: 6,
                found: 5
            })
        );

        let json = serde_json::to_string(&vec![MetricSpec::for_metric(RecordMetric::HighSnow)]);
        let parsed = serde_json::from_str::<MetricConfig>(&json.unwrap());
        assert!(parsed.is_err());
    }
}
