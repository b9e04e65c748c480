//! Centralized configuration management for rubros

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_USER_AGENT: &str = "rubros/0.1.0";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote Rubro service
    pub api_url: String,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// How long toast notifications stay on screen (milliseconds)
    pub notification_timeout_ms: u64,
    /// Log file written by the TUI and CLI
    pub log_file: PathBuf,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http: HttpConfig::default(),
            notification_timeout_ms: 5000,
            log_file: PathBuf::from("rubros.log"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url =
            std::env::var("RUBROS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let http = HttpConfig {
            timeout_seconds: parse_env_var("RUBROS_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("RUBROS_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        };

        let notification_timeout_ms =
            parse_env_var("RUBROS_NOTIFICATION_TIMEOUT_MS")?.unwrap_or(5000);

        let log_file = std::env::var("RUBROS_LOG_FILE")
            .unwrap_or_else(|_| "rubros.log".to_string())
            .into();

        Ok(Config {
            api_url,
            http,
            notification_timeout_ms,
            log_file,
        })
    }

    /// Override the service base URL (e.g. from a command line flag)
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Get notification auto-dismiss timeout as Duration
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "Rubro service URL must start with http:// or https://: {}",
                self.api_url
            ));
        }

        if let Some(parent) = self.log_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Log file directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.notification_timeout(), Duration::from_secs(5));
        config.validate().unwrap();
    }

    #[test]
    fn test_api_url_override() {
        let config = Config::default().with_api_url(Some("https://example.test/v1".to_string()));
        assert_eq!(config.api_url, "https://example.test/v1");

        let config = config.with_api_url(None);
        assert_eq!(config.api_url, "https://example.test/v1");
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = Config::default().with_api_url(Some("localhost:8080".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_checks_log_directory() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.log_file = dir.path().join("rubros.log");
        config.validate().unwrap();

        config.log_file = dir.path().join("missing").join("rubros.log");
        assert!(config.validate().is_err());
    }
}
