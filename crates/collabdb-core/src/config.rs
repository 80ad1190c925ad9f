use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config. Parsing is decoupled from the real environment so it can
/// be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    // Caps and item limits of zero would make the bounded collections useless.
    let parse_cap = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("COLLABDB_ENV", "development"))?;

    let bind_addr = parse_addr("COLLABDB_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("COLLABDB_LOG_LEVEL", "info");
    let feeds_path = PathBuf::from(or_default("COLLABDB_FEEDS_PATH", "./config/feeds.yaml"));

    let collab_cap = parse_cap("COLLABDB_COLLAB_CAP", "500")?;
    let trending_cap = parse_cap("COLLABDB_TRENDING_CAP", "100")?;
    let price_history_cap = parse_cap("COLLABDB_PRICE_HISTORY_CAP", "100")?;
    let release_cap = parse_cap("COLLABDB_RELEASE_CAP", "500")?;

    let scan_schedule = or_default("COLLABDB_SCAN_SCHEDULE", "0 */5 * * * *");
    if scan_schedule.split_whitespace().count() != 6 {
        return Err(invalid(
            "COLLABDB_SCAN_SCHEDULE",
            format!("expected a six-field cron expression, got \"{scan_schedule}\""),
        ));
    }
    let startup_scan_delay_secs = parse_u64("COLLABDB_STARTUP_SCAN_DELAY_SECS", "2")?;

    let feed_request_timeout_secs = parse_u64("COLLABDB_FEED_REQUEST_TIMEOUT_SECS", "10")?;
    let feed_user_agent = or_default("COLLABDB_FEED_USER_AGENT", "collabdb/0.1 (release-monitor)");
    let feed_max_items = parse_cap("COLLABDB_FEED_MAX_ITEMS", "15")?;
    let feed_max_retries = parse_u32("COLLABDB_FEED_MAX_RETRIES", "2")?;
    let feed_retry_backoff_base_secs = parse_u64("COLLABDB_FEED_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        feeds_path,
        collab_cap,
        trending_cap,
        price_history_cap,
        release_cap,
        scan_schedule,
        startup_scan_delay_secs,
        feed_request_timeout_secs,
        feed_user_agent,
        feed_max_items,
        feed_max_retries,
        feed_retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "COLLABDB_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
