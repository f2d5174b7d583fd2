//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! Any invalid value aborts startup.
//!
//! ## Variables
//!
//! - `HOST` - Bind host (default: `0.0.0.0`)
//! - `PORT` - Bind port (default: `8080`)
//! - `URL_SERVICE_BASE_URL` - Resolver base URL (default: `http://url-service:3000`)
//! - `ANALYTICS_SERVICE_BASE_URL` - Analytics collector base URL
//!   (default: `http://analytics-service:8000`)
//! - `RESOLVE_TIMEOUT_MS` - Resolver call timeout (default: 1500, max: 10000)
//! - `ANALYTICS_TIMEOUT_MS` - Analytics POST timeout (default: 300, max: 10000)
//! - `ANALYTICS_QUEUE_SIZE` - Analytics event buffer size (default: 256, max: 100000)
//! - `SHUTDOWN_GRACE_SECS` - Grace period for in-flight requests and event drain (default: 10)
//! - `REQUEST_TIMEOUT_MS` - Upper bound on serving one inbound request (default: 10000)
//! - `RUST_LOG` - Log filter directive (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`).
//!   `LOG_JSON=true` is accepted as a shorthand for `json`.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub url_service_base_url: String,
    pub analytics_base_url: String,
    pub resolve_timeout_ms: u64,
    pub analytics_timeout_ms: u64,
    pub analytics_queue_size: usize,
    pub shutdown_grace_secs: u64,
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or blank variables fall back to their defaults. A variable that is
    /// set but cannot be parsed is an error rather than a silent default.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let host = var_or("HOST", "0.0.0.0");
        let port = parse_var("PORT", 8080)?;

        let url_service_base_url = var_or("URL_SERVICE_BASE_URL", "http://url-service:3000");
        let analytics_base_url =
            var_or("ANALYTICS_SERVICE_BASE_URL", "http://analytics-service:8000");

        let resolve_timeout_ms = parse_var("RESOLVE_TIMEOUT_MS", 1500)?;
        let analytics_timeout_ms = parse_var("ANALYTICS_TIMEOUT_MS", 300)?;
        let analytics_queue_size = parse_var("ANALYTICS_QUEUE_SIZE", 256)?;
        let shutdown_grace_secs = parse_var("SHUTDOWN_GRACE_SECS", 10)?;
        let request_timeout_ms = parse_var("REQUEST_TIMEOUT_MS", 10_000)?;

        let log_level = var_or("RUST_LOG", "info");
        let log_format = match env::var("LOG_FORMAT").ok().filter(|v| !v.trim().is_empty()) {
            Some(format) => format.trim().to_lowercase(),
            None if var_or("LOG_JSON", "false") == "true" => "json".to_string(),
            None => "text".to_string(),
        };

        Ok(Self {
            host,
            port,
            url_service_base_url,
            analytics_base_url,
            resolve_timeout_ms,
            analytics_timeout_ms,
            analytics_queue_size,
            shutdown_grace_secs,
            request_timeout_ms,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `host` is empty or `port` is 0
    /// - an upstream base URL is not an absolute `http`/`https` URL
    /// - a timeout is outside `1..=10000` ms
    /// - `analytics_queue_size` is outside `1..=100000`
    /// - `shutdown_grace_secs` is outside `1..=300`
    /// - `request_timeout_ms` is outside `1..=60000`
    /// - `log_level` is not a valid filter directive
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            anyhow::bail!("HOST must not be empty");
        }

        if self.port == 0 {
            anyhow::bail!("PORT must be between 1 and 65535, got 0");
        }

        validate_base_url("URL_SERVICE_BASE_URL", &self.url_service_base_url)?;
        validate_base_url("ANALYTICS_SERVICE_BASE_URL", &self.analytics_base_url)?;

        if !(1..=10_000).contains(&self.resolve_timeout_ms) {
            anyhow::bail!(
                "RESOLVE_TIMEOUT_MS must be between 1 and 10000, got {}",
                self.resolve_timeout_ms
            );
        }

        if !(1..=10_000).contains(&self.analytics_timeout_ms) {
            anyhow::bail!(
                "ANALYTICS_TIMEOUT_MS must be between 1 and 10000, got {}",
                self.analytics_timeout_ms
            );
        }

        if !(1..=100_000).contains(&self.analytics_queue_size) {
            anyhow::bail!(
                "ANALYTICS_QUEUE_SIZE must be between 1 and 100000, got {}",
                self.analytics_queue_size
            );
        }

        if !(1..=300).contains(&self.shutdown_grace_secs) {
            anyhow::bail!(
                "SHUTDOWN_GRACE_SECS must be between 1 and 300, got {}",
                self.shutdown_grace_secs
            );
        }

        if !(1..=60_000).contains(&self.request_timeout_ms) {
            anyhow::bail!(
                "REQUEST_TIMEOUT_MS must be between 1 and 60000, got {}",
                self.request_timeout_ms
            );
        }

        self.log_filter()?;

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Bind address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }

    pub fn analytics_timeout(&self) -> Duration {
        Duration::from_millis(self.analytics_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Parses `log_level` into a subscriber filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `RUST_LOG` holds an invalid directive.
    pub fn log_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("RUST_LOG is not a valid filter, got '{}'", self.log_level))
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr());
        tracing::info!("  URL service: {}", self.url_service_base_url);
        tracing::info!("  Analytics service: {}", self.analytics_base_url);
        tracing::info!("  Resolve timeout: {}ms", self.resolve_timeout_ms);
        tracing::info!("  Analytics timeout: {}ms", self.analytics_timeout_ms);
        tracing::info!("  Analytics queue size: {}", self.analytics_queue_size);
        tracing::info!("  Shutdown grace: {}s", self.shutdown_grace_secs);
        tracing::info!("  Request timeout: {}ms", self.request_timeout_ms);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a variable, treating unset and blank values as missing.
fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key).ok().map(|v| v.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        _ => Ok(default),
    }
}

fn validate_base_url(key: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value).with_context(|| format!("{key} is not a valid URL"))?;

    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        anyhow::bail!("{key} must be an absolute http(s) URL, got '{value}'");
    }

    Ok(())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
