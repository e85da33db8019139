//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_storage_timeout_secs() -> u64 {
    3
}

fn default_page_size() -> i64 {
    10
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Upper bound, in seconds, for acquiring a connection or waiting on a lock.
    #[serde(default = "default_storage_timeout_secs")]
    pub storage_timeout_secs: u64,
    /// Origins allowed by CORS. Empty means same-origin only.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}
