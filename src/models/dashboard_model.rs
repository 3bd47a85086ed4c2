use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    pub version: String,
    pub description: String,
    pub dataset: DatasetSource,
    pub connection: Connection,
    #[serde(default)]
    pub configuration: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetSource {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
}
