//! Client configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Configuration for the API client, the polling queries and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin (default: http://backend:8000)
    pub base_url: String,

    /// Whole-request timeout
    pub request_timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Dashboard stats refresh interval
    pub stats_interval: Duration,

    /// Recent users refresh interval
    pub recent_users_interval: Duration,

    /// Log tail refresh interval
    pub log_interval: Duration,

    /// Retries after a failed fetch (attempts = retries + 1)
    pub retries: u32,

    /// Fixed delay between attempts
    pub retry_delay: Duration,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log file; the terminal belongs to the UI
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            stats_interval: Duration::from_secs(30),
            recent_users_interval: Duration::from_secs(60),
            log_interval: Duration::from_secs(5),
            retries: 3,
            retry_delay: Duration::from_secs(1),
            log_level: "info".to_string(),
            log_file: PathBuf::from("ftpm-admin.log"),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FTPM_API_URL`: Backend origin (default: http://backend:8000)
    /// - `FTPM_REQUEST_TIMEOUT_SECS`: Request timeout (default: 5)
    /// - `FTPM_CONNECT_TIMEOUT_SECS`: Connect timeout (default: 2)
    /// - `FTPM_STATS_INTERVAL_SECS`: Dashboard stats interval (default: 30)
    /// - `FTPM_USERS_INTERVAL_SECS`: Recent users interval (default: 60)
    /// - `FTPM_LOG_INTERVAL_SECS`: Log tail interval (default: 5)
    /// - `FTPM_RETRIES`: Retries per fetch (default: 3)
    /// - `FTPM_RETRY_DELAY_MS`: Delay between attempts (default: 1000)
    /// - `FTPM_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `FTPM_LOG_FILE`: Log file (default: ftpm-admin.log)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("FTPM_API_URL").unwrap_or(defaults.base_url),

            request_timeout: env_secs("FTPM_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),

            connect_timeout: env_secs("FTPM_CONNECT_TIMEOUT_SECS")
                .unwrap_or(defaults.connect_timeout),

            stats_interval: env_secs("FTPM_STATS_INTERVAL_SECS").unwrap_or(defaults.stats_interval),

            recent_users_interval: env_secs("FTPM_USERS_INTERVAL_SECS")
                .unwrap_or(defaults.recent_users_interval),

            log_interval: env_secs("FTPM_LOG_INTERVAL_SECS").unwrap_or(defaults.log_interval),

            retries: env::var("FTPM_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retries),

            retry_delay: env::var("FTPM_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_delay),

            log_level: env::var("FTPM_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            log_file: env::var("FTPM_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        let intervals = [
            ("stats_interval", self.stats_interval),
            ("recent_users_interval", self.recent_users_interval),
            ("log_interval", self.log_interval),
        ];
        for (name, interval) in intervals {
            if interval.is_zero() {
                return Err(ConfigError::InvalidInterval(format!("{} cannot be 0", name)));
            }
        }

        if self.request_timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("timeouts cannot be 0".into()));
        }

        Ok(())
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}
