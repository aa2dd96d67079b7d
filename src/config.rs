use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_TOKEN, DEFAULT_API_URL, DEFAULT_REQUEST_LIMIT, DEFAULT_TIMEOUT_SECONDS, ENV_API_TOKEN,
    ENV_API_URL,
};
use crate::error::{GatewayError, Result};
use crate::pipeline::rate_gate::TimeUnit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub rate_limit: RateLimitConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub token: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub time_unit: TimeUnit,
    pub request_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricsConfig {
    /// Prometheus scrape address; metrics stay disabled when unset
    pub listen: Option<SocketAddr>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            token: DEFAULT_API_TOKEN.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::Seconds,
            request_limit: DEFAULT_REQUEST_LIMIT,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Token with everything but the last four characters hidden
    pub fn masked_token(&self) -> String {
        let count = self.token.chars().count();
        if count <= 4 {
            return "****".to_string();
        }
        let tail: String = self.token.chars().skip(count - 4).collect();
        format!("****{}", tail)
    }
}

impl Config {
    /// Load from a TOML file, apply environment overrides, then validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GatewayError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `CRPT_API_URL` and `CRPT_API_TOKEN` take precedence over the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api.url = url;
        }
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            self.api.token = token;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            return Err(GatewayError::Config("api.url must not be empty".to_string()));
        }
        if self.api.token.trim().is_empty() {
            return Err(GatewayError::Config("api.token must not be empty".to_string()));
        }
        if self.rate_limit.request_limit < 1 {
            return Err(GatewayError::Config(
                "rate_limit.request_limit must be at least 1".to_string(),
            ));
        }
        if self.rate_limit.time_unit.as_millis() == 0 {
            return Err(GatewayError::Config(format!(
                "rate_limit.time_unit {:?} is shorter than one millisecond",
                self.rate_limit.time_unit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parses_full_config() {
        let config = Config::from_toml_str(
            r#"
            [api]
            url = "https://example.test/create"
            token = "secret-token"
            timeout_seconds = 5

            [rate_limit]
            time_unit = "minutes"
            request_limit = 3

            [metrics]
            listen = "127.0.0.1:9100"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.url, "https://example.test/create");
        assert_eq!(config.api.timeout(), Duration::from_secs(5));
        assert_eq!(config.rate_limit.time_unit, TimeUnit::Minutes);
        assert_eq!(config.rate_limit.request_limit, 3);
        assert_eq!(config.metrics.listen, Some("127.0.0.1:9100".parse().unwrap()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.rate_limit.time_unit, TimeUnit::Seconds);
        assert!(config.metrics.listen.is_none());
    }

    #[test]
    fn test_unknown_time_unit_is_rejected() {
        let result = Config::from_toml_str("[rate_limit]\ntime_unit = \"fortnights\"\n");
        assert!(matches!(result, Err(GatewayError::Toml(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.rate_limit.request_limit = 0;
        assert!(matches!(config.validate(), Err(GatewayError::Config(_))));

        let mut config = Config::default();
        config.rate_limit.time_unit = TimeUnit::Microseconds;
        assert!(matches!(config.validate(), Err(GatewayError::Config(_))));

        let mut config = Config::default();
        config.api.token = "  ".to_string();
        assert!(matches!(config.validate(), Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[rate_limit]\ntime_unit = \"hours\"\nrequest_limit = 7").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.rate_limit.time_unit, TimeUnit::Hours);
        assert_eq!(config.rate_limit.request_limit, 7);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = Config::load("/nonexistent/crpt_gateway/config.toml");
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_masked_token() {
        let mut api = ApiConfig::default();
        api.token = "abcdef123456".to_string();
        assert_eq!(api.masked_token(), "****3456");
        api.token = "abc".to_string();
        assert_eq!(api.masked_token(), "****");
    }
}
