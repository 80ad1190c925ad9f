use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub feeds_path: PathBuf,
    /// Maximum number of retained collaboration records.
    pub collab_cap: usize,
    /// Maximum number of entries in the trending-search table.
    pub trending_cap: usize,
    /// Maximum number of price points retained per product.
    pub price_history_cap: usize,
    /// Maximum number of entries on the release calendar.
    pub release_cap: usize,
    /// Six-field cron expression (seconds first) for the recurring scan.
    pub scan_schedule: String,
    pub startup_scan_delay_secs: u64,
    pub feed_request_timeout_secs: u64,
    pub feed_user_agent: String,
    /// Items taken from the head of each feed per scan.
    pub feed_max_items: usize,
    pub feed_max_retries: u32,
    pub feed_retry_backoff_base_secs: u64,
}
