use axum::extract::ws::{Message, WebSocket};
use chrono::NaiveTime;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::constants::PM25_COLUMN;
use crate::core::dataset::Dataset;
use crate::core::trend;

#[derive(Serialize)]
struct SeriesPayload {
    timestamp: f64,
    value: f64,
    label: String,
    seq: u64,
    end_flag: bool,
}

/// Stream a station's full monthly PM2.5 series over a WebSocket, one point
/// per frame, closing with an end-flag frame. Months with no PM2.5 mean are
/// skipped.
pub async fn handle_ws_fetch(mut socket: WebSocket, dataset: Arc<Dataset>, station: String) {
    info!("ws_fetch streaming started: {}", station);

    let mut seq: u64 = 0;

    if !dataset.stations().iter().any(|s| s == &station) {
        error!("station not found: {}", station);
        return;
    }

    let series = trend::monthly_means(&dataset, &station);

    for aggregate in series {
        let Some(pm25) = aggregate.mean_of(PM25_COLUMN) else {
            continue;
        };

        let payload = SeriesPayload {
            timestamp: aggregate
                .month_end
                .and_time(NaiveTime::MIN)
                .and_utc()
                .timestamp() as f64,
            value: pm25,
            label: aggregate.month_end.format("%b %Y").to_string(),
            seq,
            end_flag: false,
        };

        let json = match serde_json::to_string(&payload) {
            Ok(j) => j,
            Err(e) => {
                error!("json serialize error: {}", e);
                return;
            }
        };

        if let Err(e) = socket.send(Message::Text(json.into())).await {
            warn!("ws send failed: {}", e);
            return;
        }

        seq += 1;
    }

    let end_payload = SeriesPayload {
        timestamp: 0.0,
        value: 0.0,
        label: String::new(),
        seq,
        end_flag: true,
    };

    if let Ok(json) = serde_json::to_string(&end_payload) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    info!("ws_fetch finished: {}", station);
}
