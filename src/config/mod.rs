//! Configuration management for the bilicmt crawler
//!
//! This module handles loading and validating configuration from environment
//! variables, TOML files, and command-line arguments. The authentication
//! cookie is deliberately env-only with no default value; it is wrapped in
//! [`Credential`] so it can never leak through `Debug` output or logs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of comment pages to fetch per video
    pub max_pages: u32,

    /// Lower bound of the politeness delay before each request (milliseconds)
    pub delay_min_ms: u64,

    /// Upper bound of the politeness delay before each request (milliseconds)
    pub delay_max_ms: u64,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent override (a built-in browser pool is used when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Authentication cookie forwarded with each request.
    ///
    /// Anonymous requests work but the comment API may return fewer or no
    /// replies. Loaded from `BILICMT_COOKIE` only; never serialized.
    #[serde(skip)]
    pub cookie: Option<Credential>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl LoggingConfig {
    /// Build the env-filter directives for the subscriber
    ///
    /// `--verbose` wins over the configured level.
    #[must_use]
    pub fn filter_directives(&self, verbose: bool) -> String {
        if verbose {
            String::from("bilicmt=debug,info")
        } else {
            format!("bilicmt={},warn", self.level)
        }
    }
}

/// Read the authentication cookie from `BILICMT_COOKIE`
///
/// Blank values are treated as unset.
fn cookie_from_env() -> Option<Credential> {
    std::env::var("BILICMT_COOKIE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Credential::new)
}

/// An opaque credential whose value is redacted from `Debug` and `Display`
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw credential string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the underlying value for request construction
    ///
    /// Callers must not write the returned value to logs or output files.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Recognized variables (all optional):
    /// `BILICMT_MAX_PAGES`, `BILICMT_DELAY_MIN_MS`, `BILICMT_DELAY_MAX_MS`,
    /// `BILICMT_REQUEST_TIMEOUT`, `BILICMT_USER_AGENT`, `BILICMT_COOKIE`,
    /// `BILICMT_LOG_LEVEL`, `BILICMT_LOG_FORMAT`.
    pub fn from_env() -> Result<Self> {
        let max_pages = std::env::var("BILICMT_MAX_PAGES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(100);

        let delay_min_ms = std::env::var("BILICMT_DELAY_MIN_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2000);

        let delay_max_ms = std::env::var("BILICMT_DELAY_MAX_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5000);

        let request_timeout_secs = std::env::var("BILICMT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        let user_agent = std::env::var("BILICMT_USER_AGENT").ok();

        let cookie = cookie_from_env();

        let log_level = std::env::var("BILICMT_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("BILICMT_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            crawler: CrawlerConfig {
                max_pages,
                delay_min_ms,
                delay_max_ms,
                request_timeout_secs,
                user_agent,
                cookie,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a TOML file
    ///
    /// The cookie is still taken from the environment afterwards; config
    /// files must not carry credentials.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.crawler.cookie = cookie_from_env();
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }

        if self.crawler.delay_min_ms > self.crawler.delay_max_ms {
            anyhow::bail!("delay_min_ms must not exceed delay_max_ms");
        }

        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }

    /// Get the politeness delay interval as Durations
    #[must_use]
    pub fn delay_interval(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.crawler.delay_min_ms),
            Duration::from_millis(self.crawler.delay_max_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                max_pages: 100,
                delay_min_ms: 2000,
                delay_max_ms: 5000,
                request_timeout_secs: 10,
                user_agent: None,
                cookie: None,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_delay_interval_rejected() {
        let mut config = Config::default();
        config.crawler.delay_min_ms = 5000;
        config.crawler.delay_max_ms = 2000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_credential_redacted_in_debug() {
        let mut config = Config::default();
        config.crawler.cookie = Some(Credential::new("SESSDATA=secret-value"));

        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("Credential(***)"));
    }

    #[test]
    fn test_credential_not_serialized() {
        let mut config = Config::default();
        config.crawler.cookie = Some(Credential::new("SESSDATA=secret-value"));

        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("secret-value"));
    }

    #[test]
    fn test_credential_exposes_raw_value() {
        let cred = Credential::new("abc");
        assert_eq!(cred.expose(), "abc");
        assert_eq!(format!("{cred}"), "***");
    }

    // Serializes tests that touch the BILICMT_COOKIE process environment
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn test_from_file_takes_cookie_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, toml::to_string(&Config::default()).unwrap()).unwrap();

        std::env::set_var("BILICMT_COOKIE", "SESSDATA=from-env");
        let config = Config::from_file(&path).unwrap();
        std::env::remove_var("BILICMT_COOKIE");

        assert_eq!(
            config.crawler.cookie,
            Some(Credential::new("SESSDATA=from-env"))
        );
    }

    #[test]
    fn test_blank_env_cookie_is_unset() {
        let _guard = ENV_LOCK.lock().unwrap();

        std::env::set_var("BILICMT_COOKIE", "   ");
        let cookie = cookie_from_env();
        std::env::remove_var("BILICMT_COOKIE");

        assert!(cookie.is_none());
    }

    #[test]
    fn test_filter_directives() {
        let logging = LoggingConfig {
            level: String::from("trace"),
            format: String::from("text"),
        };
        assert_eq!(logging.filter_directives(false), "bilicmt=trace,warn");
        assert_eq!(logging.filter_directives(true), "bilicmt=debug,info");
    }
}
