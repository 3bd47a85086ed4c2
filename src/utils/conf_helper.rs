use crate::models::dashboard_model::DashboardConfig;
use std::sync::OnceLock;
use tokio::fs;
use tokio::net::TcpListener;
use tracing::info;

static CONFIG_CACHE: OnceLock<DashboardConfig> = OnceLock::new();

pub async fn init_config_and_bind() -> Result<TcpListener, String> {
    let file_path = "dashboard.json";

    let data = fs::read_to_string(file_path)
        .await
        .map_err(|e| format!("File read Error: {e} {file_path}"))?;

    let mut config: DashboardConfig = serde_json::from_str(&data)
        .map_err(|e| format!("JSON Parse Error: {e}"))?;

    let bind_addr = format!("{}:{}", config.connection.ip, config.connection.port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("Bind failed: {e}"))?;

    let actual_port = listener
        .local_addr()
        .map_err(|e| format!("Addr error: {e}"))?
        .port();

    // Port 0 in the config means "pick one"; patch the real port back so
    // /info reports the bound address
    config.connection.port = actual_port;

    CONFIG_CACHE
        .set(config)
        .map_err(|_| "Config already initialized".to_string())?;

    info!("Config initialized with dynamic port: {}", actual_port);

    Ok(listener)
}

pub fn get_cached_config() -> &'static DashboardConfig {
    CONFIG_CACHE.get().expect("Config not initialized")
}
