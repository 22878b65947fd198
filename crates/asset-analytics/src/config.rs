use std::env;
use std::time::Duration;

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub inventory_service_url: String,
    pub upstream_timeout: Duration,
    pub cache_ttl: Duration,
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3010,
            inventory_service_url: "http://localhost:3001".to_string(),
            upstream_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(60),
            json_logs: false,
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from any key lookup; unparsable numbers keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let inventory_service_url = lookup("INVENTORY_SERVICE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.inventory_service_url);

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.upstream_timeout);

        let cache_ttl = lookup("CACHE_TTL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let json_logs = lookup("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

        Self {
            port,
            inventory_service_url,
            upstream_timeout,
            cache_ttl,
            json_logs,
        }
    }
}
