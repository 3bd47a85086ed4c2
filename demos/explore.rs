// Example usage of the dataset core - walks the three dashboard views

use airq_core::core::detail::{self, DetailResult};
use airq_core::core::map;
use airq_core::core::trend;
use airq_core::{Dataset, Result};
use chrono::NaiveDate;
use tracing::{info, Level};
use tracing_subscriber;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    // Load the joined readings once; every view below queries the same handle
    let dataset = Dataset::load("data/sample_readings.csv")?;

    info!("Stations in the dataset:");
    for station in dataset.stations() {
        info!("  {}", station);
    }

    // Station map view
    let map = map::station_map();
    info!(
        "\nMap: {} markers, centered on ({}, {}) at zoom {}",
        map.markers.len(),
        map.center.lat,
        map.center.lon,
        map.zoom
    );

    if let Some(station) = dataset.stations().first() {
        // Monthly trend view over the station's full range
        if let Some((from, to)) = trend::month_range(&dataset, station) {
            info!("\nMonthly PM2.5 trend for {} ({} to {}):", station, from, to);
            for point in trend::trend_series(&dataset, station, from, to) {
                match point.pm25 {
                    Some(pm25) => info!("  {}: {:.2}", point.label, pm25),
                    None => info!("  {}: no readings", point.label),
                }
            }
        }

        // Detail view for one date and hour
        let date = NaiveDate::from_ymd_opt(2013, 3, 1).unwrap();
        match detail::detail(&dataset, station, date, 12) {
            DetailResult::Found(comparison) => {
                info!("\nDetail for {} at {}:", station, comparison.time);
                let panel = detail::metrics_panel(&dataset, &comparison)?;
                for metric in panel.left.iter().chain(&panel.right) {
                    info!("  {}: {} ({})", metric.label, metric.value, metric.delta);
                }
            }
            DetailResult::NotFound => {
                info!("\nNo reading for {} on {} at 12:00", station, date);
            }
        }
    }

    Ok(())
}
