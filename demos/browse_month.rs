//! Loads a station preset and prints the latest month next to its daily records.
//!
//! `cargo run --example browse_month -- DFWthr 2021 2`

use climate_records::{AcisClient, ClimateError, Station};
use std::env;

#[tokio::main]
async fn main() -> Result<(), ClimateError> {
    let mut args = env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "DFWthr".to_string());
    let station = Station::by_name(&preset)
        .or_else(|| Station::by_id(&preset))
        .unwrap_or(climate_records::STATIONS[1]);
    let year: Option<i32> = args.next().and_then(|y| y.parse().ok());
    let month: Option<u32> = args.next().and_then(|m| m.parse().ok());

    let client = AcisClient::default();
    let climate = client.station_climate().station(station.id).call().await?;

    if let Some((first, last)) = climate.history().year_span() {
        println!("{}: observations from {} to {}", station, first, last);
    }

    let view = match (year, month) {
        (Some(year), Some(month)) => Some(climate.month_view(year, month)?),
        _ => climate.latest_month_view(),
    };
    let Some(view) = view else {
        println!("No observations for {}", station);
        return Ok(());
    };

    println!("\n--- {} ---", view.title(station.name));
    println!("{}", view.observations_frame()?);
    println!("\n--- Daily records for {} ---", view.period.month().name());
    println!("{}", view.records_frame()?);

    if !climate.rejected_records().is_empty() {
        println!("{} record entries had unusable dates", climate.rejected_records().len());
    }
    Ok(())
}
