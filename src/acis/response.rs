use crate::acis::error::AcisError;
use crate::types::metric::{MetricConfig, RecordMetric};
use crate::types::record::RawExtremeEntry;
use serde::Deserialize;
use serde_json::Value;

/// The raw entries of one metric as returned by ACIS.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecordSeries {
    pub metric: RecordMetric,
    pub entries: Vec<RawExtremeEntry>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    smry: Option<Vec<Vec<Vec<Value>>>>,
    #[serde(default)]
    error: Option<String>,
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Splits a `smry` response into one raw series per configured metric.
///
/// Each summary entry is `[value, date]`. Entries with fewer fields keep empty
/// text for what is missing and are rejected later during normalization.
pub fn parse_records_response(
    body: &str,
    station: &str,
    config: &MetricConfig,
) -> Result<Vec<RawRecordSeries>, AcisError> {
    let response: SummaryResponse =
        serde_json::from_str(body).map_err(|source| AcisError::JsonDecode {
            station: station.to_string(),
            source,
        })?;

    if let Some(message) = response.error {
        return Err(AcisError::Service {
            station: station.to_string(),
            message,
        });
    }

    let summaries = response.smry.unwrap_or_default();
    let specs = config.specs();
    if summaries.len() != specs.len() {
        return Err(AcisError::SummaryShape {
            station: station.to_string(),
            expected: specs.len(),
            found: summaries.len(),
        });
    }

    Ok(specs
        .iter()
        .zip(summaries)
        .map(|(spec, entries)| RawRecordSeries {
            metric: spec.metric,
            entries: entries
                .iter()
                .map(|fields| {
                    RawExtremeEntry::new(scalar_text(fields.first()), scalar_text(fields.get(1)))
                })
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> String {
        r#"{"meta":{"name":"Dallas-Fort Worth Area"},"smry":[
            [["102","1980-07-04"],["M","1899-07-05"]],
            [["-8","1899-02-12"]],
            [[5.91,"1932-09-05"]],
            [["T","1978-01-15"],["4.0"]],
            [["14","1899-02-12"]],
            [["84","2011-08-03"]]
        ]}"#
        .to_string()
    }

    #[test]
    fn test_parse_six_summaries_in_config_order() -> Result<(), AcisError> {
        let series = parse_records_response(&body(), "DFWthr", &MetricConfig::default())?;

        assert_eq!(series.len(), 6);
        let metrics: Vec<RecordMetric> = series.iter().map(|s| s.metric).collect();
        assert_eq!(metrics, RecordMetric::ALL.to_vec());
        assert_eq!(series[0].entries[0], RawExtremeEntry::new("102", "1980-07-04"));
        assert_eq!(series[2].entries[0], RawExtremeEntry::new("5.91", "1932-09-05"));
        assert_eq!(series[3].entries[1], RawExtremeEntry::new("4.0", ""));
        Ok(())
    }

    #[test]
    fn test_service_error_is_surfaced() {
        let result = parse_records_response(
            r#"{"error":"no data available"}"#,
            "BOGUS",
            &MetricConfig::default(),
        );
        assert!(matches!(
            result,
            Err(AcisError::Service { message, .. }) if message == "no data available"
        ));
    }

    #[test]
    fn test_wrong_summary_count_is_rejected() {
        let result = parse_records_response(
            r#"{"smry":[[["1","2000-01-01"]]]}"#,
            "DFWthr",
            &MetricConfig::default(),
        );
        assert!(matches!(
            result,
            Err(AcisError::SummaryShape {
                expected: 6,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let result = parse_records_response("<html>", "DFWthr", &MetricConfig::default());
        assert!(matches!(result, Err(AcisError::JsonDecode { .. })));
    }
}
