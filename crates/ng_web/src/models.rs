use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn default_count() -> usize {
    5
}

fn default_days() -> u32 {
    7
}

#[derive(Debug, Deserialize)]
pub struct CollectParams {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: Option<String>,
}
