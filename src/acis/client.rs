//! Async client for the Applied Climate Information System (ACIS) web services.

use crate::acis::error::AcisError;
use crate::acis::request::{observation_query, RecordsRequest};
use crate::acis::response::{parse_records_response, RawRecordSeries};
use crate::climate::StationClimate;
use crate::observations::csv::csv_to_history;
use crate::observations::history::ObservationHistory;
use crate::types::metric::MetricConfig;
use crate::ClimateError;
use bon::bon;
use log::{info, warn};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tokio::task;

const DEFAULT_BASE_URL: &str = "http://data.rcc-acis.org";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetches station data from ACIS.
///
/// Every call goes to the network; nothing is cached between station loads.
///
/// # Examples
///
/// ```no_run
/// # use climate_records::{AcisClient, ClimateError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ClimateError> {
/// let client = AcisClient::builder().build();
/// let climate = client.station_climate().station("DFWthr").call().await?;
/// let view = climate.month_view(2020, 6)?;
/// println!("{} observed days, {} record days", view.observations.len(), view.records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AcisClient {
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl Default for AcisClient {
    fn default() -> Self {
        AcisClient::builder().build()
    }
}

#[bon]
impl AcisClient {
    /// Creates a client.
    ///
    /// * `.base_url(String)`: Optional. Service root, defaults to `http://data.rcc-acis.org`.
    /// * `.timeout(Duration)`: Optional. Per-request timeout, defaults to 60 seconds.
    #[builder]
    pub fn new(base_url: Option<String>, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            http: Client::new(),
        }
    }

    fn stn_data_url(&self) -> String {
        format!("{}/StnData", self.base_url)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, AcisError> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AcisError::NetworkRequest(url.to_string(), e))?;

        match response.error_for_status() {
            Ok(resp) => Ok(resp),
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                Err(if let Some(status) = e.status() {
                    AcisError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    AcisError::NetworkRequest(url.to_string(), e)
                })
            }
        }
    }

    /// Downloads the full daily observation history of a station.
    pub async fn fetch_observations(&self, station: &str) -> Result<ObservationHistory, AcisError> {
        let url = self.stn_data_url();
        info!("Downloading observation history for {} from {}", station, url);

        let request = self.http.get(&url).query(&observation_query(station));
        let bytes = self
            .send(request, &url)
            .await?
            .bytes()
            .await
            .map_err(|e| AcisError::NetworkRequest(url.clone(), e))?;

        let station_owned = station.to_string();
        task::spawn_blocking(move || csv_to_history(&bytes, &station_owned)).await?
    }

    /// Downloads the six daily-record series of a station.
    pub async fn fetch_records(
        &self,
        station: &str,
        config: &MetricConfig,
    ) -> Result<Vec<RawRecordSeries>, AcisError> {
        let url = self.stn_data_url();
        info!("Requesting daily records for {} from {}", station, url);

        let request = self.http.post(&url).json(&RecordsRequest::new(station, config));
        let body = self
            .send(request, &url)
            .await?
            .text()
            .await
            .map_err(|e| AcisError::NetworkRequest(url.clone(), e))?;

        parse_records_response(&body, station, config)
    }

    /// Fetches history and records for one station and derives its climate tables.
    ///
    /// * `.station(&str)`: **Required.** ACIS station id, e.g. `"DFWthr"`.
    /// * `.metrics(MetricConfig)`: Optional. Reduce direction per metric, defaults to
    ///   [`MetricConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::Acis`] if either download fails. Nothing is
    /// derived from a partial fetch.
    #[builder]
    pub async fn station_climate(
        &self,
        station: &str,
        metrics: Option<MetricConfig>,
    ) -> Result<StationClimate, ClimateError> {
        let config = metrics.unwrap_or_default();
        let (history, records) = tokio::try_join!(
            self.fetch_observations(station),
            self.fetch_records(station, &config)
        )?;
        Ok(StationClimate::build(station, history, &records, config))
    }
}
