//! Client configuration
//!
//! Settings are read from a YAML file, then the `MAILGUN_API_KEY`
//! environment variable, then command-line flags (later wins).
//!
//! ```yaml
//! api_key: key-...
//! region: eu
//! domain: mg.example.com
//! timeout_secs: 30
//! rate_limit:
//!   requests_per_second: 5
//! retry:
//!   max_retries: 3
//!   backoff_type: exponential
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::retry::RetryPolicy;
use crate::types::{Endpoints, Region};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "MAILGUN_API_KEY";

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key used as the Basic auth password
    #[serde(default)]
    pub api_key: Option<String>,

    /// Default region
    #[serde(default)]
    pub region: Region,

    /// Default sending domain
    #[serde(default)]
    pub domain: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Client-side request pacing
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Base URL overrides
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Caller-side retry policy for whole fetches
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            region: Region::default(),
            domain: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            rate_limit: None,
            endpoints: EndpointsConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Optional per-region base URL overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// EU base URL
    #[serde(default)]
    pub eu: Option<String>,
    /// US base URL
    #[serde(default)]
    pub us: Option<String>,
}

impl ClientConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load a config file if given, otherwise start from defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Take the API key from the environment when set
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_value(std::env::var(API_KEY_ENV).ok())
    }

    fn with_env_value(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if let Some(rate) = &self.rate_limit {
            if rate.requests_per_second == 0 {
                return Err(Error::config(
                    "rate_limit.requests_per_second must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// The API key, or an error naming the missing field
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::missing_field("api_key"))
    }

    /// Transport settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_secs));

        builder = match &self.rate_limit {
            Some(rate) => builder.rate_limit(rate.clone()),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }

    /// Regional endpoints with overrides applied
    pub fn endpoints(&self) -> Endpoints {
        let defaults = Endpoints::default();
        Endpoints {
            eu: self.endpoints.eu.clone().unwrap_or(defaults.eu),
            us: self.endpoints.us.clone().unwrap_or(defaults.us),
        }
    }

    /// Retry policy for whole fetches
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BackoffType;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ClientConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.region, Region::Eu);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.endpoints(), Endpoints::default());
    }

    #[test]
    fn test_full_document() {
        let yaml = r"
api_key: key-abc
region: us
domain: mg.example.com
timeout_secs: 10
user_agent: reporting/2.0
rate_limit:
  requests_per_second: 5
endpoints:
  us: http://localhost:9000
retry:
  max_retries: 3
  backoff_type: linear
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.api_key().unwrap(), "key-abc");
        assert_eq!(config.region, Region::Us);
        assert_eq!(config.domain.as_deref(), Some("mg.example.com"));

        let http = config.http_config();
        assert_eq!(http.timeout, Duration::from_secs(10));
        assert_eq!(http.user_agent, "reporting/2.0");
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::new(5, 10)));

        let endpoints = config.endpoints();
        assert_eq!(endpoints.us, "http://localhost:9000");
        assert_eq!(endpoints.eu, "https://api.eu.mailgun.net");

        let retry = config.retry_policy();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.backoff_type, BackoffType::Linear);
        assert_eq!(retry.initial_backoff_ms, 500);
    }

    #[test]
    fn test_no_rate_limit_by_default() {
        let config = ClientConfig::default();
        assert!(config.http_config().rate_limit.is_none());
    }

    #[test]
    fn test_invalid_region() {
        let err = ClientConfig::from_yaml_str("region: asia").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientConfig::from_yaml_str("timeout_secs: 0").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err =
            ClientConfig::from_yaml_str("rate_limit:\n  requests_per_second: 0").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_api_key() {
        let err = ClientConfig::default().api_key().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_key"));

        let config = ClientConfig {
            api_key: Some("  ".to_string()),
            ..ClientConfig::default()
        };
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_env_overrides_file_key() {
        let config = ClientConfig {
            api_key: Some("from-file".to_string()),
            ..ClientConfig::default()
        };

        let config = config.with_env_value(Some("from-env".to_string()));
        assert_eq!(config.api_key().unwrap(), "from-env");

        let config = config.with_env_value(Some(String::new()));
        assert_eq!(config.api_key().unwrap(), "from-env");

        let config = config.with_env_value(None);
        assert_eq!(config.api_key().unwrap(), "from-env");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: key-file\nregion: us").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key().unwrap(), "key-file");
        assert_eq!(config.region, Region::Us);

        let loaded = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(ClientConfig::load(None).unwrap(), ClientConfig::default());
    }
}
