use anyhow::Context;
use axum::Router;
use tracing::{info, Level};
use tracing_subscriber;

mod models;
mod routes;
mod state;
mod utils;

use crate::state::app_state::AppState;
use crate::utils::conf_helper::{get_cached_config, init_config_and_bind};
use airq_core::Dataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // === CONFIG + LISTENER ===
    let listener = init_config_and_bind()
        .await
        .expect("CRITICAL INIT FAILURE");

    let config = get_cached_config();

    info!(
        "Server initialized on {}:{}",
        config.connection.ip,
        config.connection.port
    );

    let dataset = Dataset::load(&config.dataset.path)
        .with_context(|| format!("loading dataset {}", config.dataset.path))?;

    info!(
        "Dataset loaded: {} rows, {} stations, {} columns",
        dataset.len(),
        dataset.stations().len(),
        dataset.columns().len()
    );

    let state = AppState::new(dataset);

    let app = Router::new()
        .merge(routes::info_routes::health_routes())
        .merge(routes::view_routes::view_routes(state.clone()));

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
