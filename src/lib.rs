mod acis;
mod climate;
mod error;
mod observations;
mod records;
mod types;

pub use error::{ClimateError, InvalidRangeError, MalformedDateError};

pub use acis::client::AcisClient;
pub use acis::error::AcisError;
pub use acis::request::RecordsRequest;
pub use acis::response::{parse_records_response, RawRecordSeries};

pub use climate::{MonthView, StationClimate};

pub use observations::frame::month_to_frame;
pub use observations::history::ObservationHistory;

pub use records::frame::records_to_frame;
pub use records::merger::{AllTimeRecord, MergedRecords, MergedRecordsRow, RecordsMerger};
pub use records::normalizer::{NormalizedSeries, RecordSeriesNormalizer};

pub use types::calendar::{DayKey, MonthOfYear, StartEndDate, YearMonth};
pub use types::metric::{
    Element, MetricConfig, MetricConfigError, MetricSpec, RecordMetric, Reduce,
};
pub use types::observation::{DailyObservation, MonthObservation};
pub use types::record::{Extreme, NormalizedRecordRow, RawExtremeEntry, RecordValue, YearValue};
pub use types::station::{Station, STATIONS};
