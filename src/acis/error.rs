use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcisError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode ACIS response for station '{station}'")]
    JsonDecode {
        station: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("ACIS reported an error for station '{station}': {message}")]
    Service { station: String, message: String },

    #[error("ACIS returned {found} record summaries for station '{station}', expected {expected}")]
    SummaryShape {
        station: String,
        expected: usize,
        found: usize,
    },

    #[error("I/O error processing CSV data for station '{station}'")]
    CsvReadIo {
        station: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error processing CSV data for station '{station}'")]
    CsvReadPolars {
        station: String,
        #[source]
        source: PolarsError,
    },

    #[error("CSV column count ({found}) does not match schema length ({expected}) for station {station}")]
    SchemaMismatch {
        station: String,
        expected: usize,
        found: usize,
    },

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
