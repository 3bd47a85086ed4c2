use axum::{
    extract::{ws::WebSocketUpgrade, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::state::app_state::AppState;
use airq_core::core::detail::{self, DetailResult, MetricsPanel};
use airq_core::core::map::{self, StationMap};
use airq_core::core::trend;
use airq_core::{handle_ws_fetch, MonthKey, TrendPoint};

#[derive(Serialize)]
pub struct DatasetSummary {
    pub id: Uuid,
    pub source: String,
    pub rows: usize,
    pub stations: usize,
    pub columns: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct TrendQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Serialize)]
pub struct TrendResponse {
    pub station: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
    pub points: Vec<TrendPoint>,
}

#[derive(Deserialize, Debug)]
pub struct DetailQuery {
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_hour")]
    pub hour: u32,
}

// The UI's initial picker values
fn default_date() -> String {
    "2013-03-01".to_string()
}

fn default_hour() -> u32 {
    12
}

#[derive(Serialize)]
pub struct DetailResponse {
    pub station: String,
    pub date: String,
    pub hour: u32,
    pub found: bool,
    pub message: String,
    pub wind: Option<String>,
    pub panel: Option<MetricsPanel>,
}

/// =======================
/// ROUTER
/// =======================

pub fn view_routes(state: AppState) -> Router {
    Router::new()
        .route("/dataset", get(dataset_summary))
        .route("/stations", get(list_stations))
        .route("/map", get(station_map))
        .route("/trend/{station}", get(trend_view))
        .route("/fetch/{station}", get(ws_fetch))
        .route("/detail/{station}", get(detail_view))
        .with_state(state)
}

/// =======================
/// HANDLERS
/// =======================

async fn dataset_summary(State(state): State<AppState>) -> Json<DatasetSummary> {
    let config = crate::utils::conf_helper::get_cached_config();

    Json(DatasetSummary {
        id: state.dataset_id,
        source: config.dataset.path.clone(),
        rows: state.dataset.len(),
        stations: state.dataset.stations().len(),
        columns: state
            .dataset
            .columns()
            .iter()
            .map(|c| c.name.clone())
            .collect(),
    })
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dataset.stations().to_vec())
}

async fn station_map() -> Json<StationMap> {
    Json(map::station_map())
}

async fn trend_view(
    State(state): State<AppState>,
    Path(station): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Response {
    debug!(
        "Trend request: station={}, from={:?}, to={:?}",
        station, query.from, query.to
    );

    let available = trend::month_range(&state.dataset, &station);

    // An omitted bound falls back to the station's first/last month
    let from = match &query.from {
        Some(raw) => match MonthKey::parse(raw) {
            Ok(key) => Some(key),
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        },
        None => available.map(|(min, _)| min),
    };
    let to = match &query.to {
        Some(raw) => match MonthKey::parse(raw) {
            Ok(key) => Some(key),
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        },
        None => available.map(|(_, max)| max),
    };

    let points = match (from, to) {
        (Some(from), Some(to)) => trend::trend_series(&state.dataset, &station, from, to),
        // Station with no rows: an empty series, not an error
        _ => Vec::new(),
    };

    Json(TrendResponse {
        station,
        from: from.map(|k| k.to_string()),
        to: to.map(|k| k.to_string()),
        available_from: available.map(|(min, _)| min.to_string()),
        available_to: available.map(|(_, max)| max.to_string()),
        points,
    })
    .into_response()
}

async fn ws_fetch(
    State(state): State<AppState>,
    Path(station): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    if !state.dataset.stations().iter().any(|s| s == &station) {
        error!("Station not found: {}", station);
        return StatusCode::NOT_FOUND.into_response();
    }

    let dataset = state.dataset.clone();
    ws.on_upgrade(move |socket| handle_ws_fetch(socket, dataset, station))
}

async fn detail_view(
    State(state): State<AppState>,
    Path(station): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Response {
    debug!(
        "Detail request: station={}, date={}, hour={}",
        station, query.date, query.hour
    );

    let date = match NaiveDate::parse_from_str(&query.date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("bad date: {}", query.date),
            )
                .into_response()
        }
    };
    if query.hour > 23 {
        return (
            StatusCode::BAD_REQUEST,
            format!("hour out of range: {}", query.hour),
        )
            .into_response();
    }

    match detail::detail(&state.dataset, &station, date, query.hour) {
        DetailResult::NotFound => Json(DetailResponse {
            message: format!(
                "No data for station {} on {} at {}:00.",
                station, query.date, query.hour
            ),
            station,
            date: query.date,
            hour: query.hour,
            found: false,
            wind: None,
            panel: None,
        })
        .into_response(),

        DetailResult::Found(comparison) => {
            let panel = match detail::metrics_panel(&state.dataset, &comparison) {
                Ok(panel) => panel,
                Err(e) => {
                    error!("Metrics panel failed for {}: {}", station, e);
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            };

            Json(DetailResponse {
                message: format!(
                    "Details for station {} on {} at {}:00 with wind direction {}",
                    station, query.date, query.hour, comparison.wind_code
                ),
                station,
                date: query.date,
                hour: query.hour,
                found: true,
                wind: Some(comparison.wind_code.clone()),
                panel: Some(panel),
            })
            .into_response()
        }
    }
}
