//! Request bodies for the ACIS `StnData` web service.
//!
//! Query builder reference: <https://builder.rcc-acis.org/>

use crate::types::metric::{Element, MetricConfig, MetricSpec, Reduce};
use serde::Serialize;

/// Start/end date meaning "period of record".
const PERIOD_OF_RECORD: &str = "por";

/// ACIS element ids of the daily observation CSV: maxt, mint, pcpn, snow, snwd.
pub(crate) const OBSERVATION_ELEMS: &str = "1,2,4,10,11";

#[derive(Debug, Serialize)]
struct SummarySpec {
    add: &'static str,
    reduce: Reduce,
}

#[derive(Debug, Serialize)]
struct ElemRequest {
    name: Element,
    interval: &'static str,
    duration: u32,
    smry: SummarySpec,
    smry_only: &'static str,
    groupby: &'static str,
}

impl From<&MetricSpec> for ElemRequest {
    fn from(spec: &MetricSpec) -> Self {
        Self {
            name: spec.element,
            interval: "dly",
            duration: 1,
            smry: SummarySpec {
                add: "date",
                reduce: spec.reduce,
            },
            smry_only: "1",
            groupby: "year",
        }
    }
}

/// Asks ACIS for the per-calendar-day extreme of each configured metric over
/// the whole period of record, with the date each extreme occurred.
#[derive(Debug, Serialize)]
pub struct RecordsRequest<'a> {
    sid: &'a str,
    sdate: &'static str,
    edate: &'static str,
    elems: Vec<ElemRequest>,
}

impl<'a> RecordsRequest<'a> {
    pub fn new(station: &'a str, config: &MetricConfig) -> Self {
        Self {
            sid: station,
            sdate: PERIOD_OF_RECORD,
            edate: PERIOD_OF_RECORD,
            elems: config.specs().iter().map(ElemRequest::from).collect(),
        }
    }
}

/// Query parameters for the daily observation CSV of a station.
pub(crate) fn observation_query(station: &str) -> [(&'static str, &str); 5] {
    [
        ("sid", station),
        ("sdate", PERIOD_OF_RECORD),
        ("edate", PERIOD_OF_RECORD),
        ("elems", OBSERVATION_ELEMS),
        ("output", "csv"),
    ]
}
