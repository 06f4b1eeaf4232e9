//! Configuration for Doohly clients.
//!
//! A [`DoohlyConfig`] value is passed to client construction. The
//! [`global`](crate::global) module keeps an optional process-wide default.

use crate::client::{DEFAULT_API_BASE_URL, DEFAULT_OPEN_TIMEOUT, DEFAULT_TIMEOUT};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Message used whenever a token is missing or empty.
pub const MISSING_TOKEN_MESSAGE: &str = "API token is required";

/// Configuration for a Doohly client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DoohlyConfig {
    /// API token sent as a bearer credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// API base URL
    #[validate(url)]
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection open timeout in seconds
    #[validate(range(min = 1))]
    #[serde(default = "default_open_timeout_secs")]
    pub open_timeout_secs: u64,

    /// Log every request and response status at `info` level
    #[serde(default)]
    pub log_requests: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT
}

const fn default_open_timeout_secs() -> u64 {
    DEFAULT_OPEN_TIMEOUT
}

impl DoohlyConfig {
    /// Create a configuration with defaults and the given token.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::default().with_token(api_token)
    }

    /// Set the API token.
    #[must_use]
    pub fn with_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set connection open timeout in seconds.
    #[must_use]
    pub const fn with_open_timeout(mut self, seconds: u64) -> Self {
        self.open_timeout_secs = seconds;
        self
    }

    /// Enable or disable request logging.
    #[must_use]
    pub const fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the open timeout as a Duration.
    #[must_use]
    pub const fn open_timeout(&self) -> Duration {
        Duration::from_secs(self.open_timeout_secs)
    }

    /// Returns the token if it is present and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Check that the configuration can be used to send requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the token is missing or empty, the base
    /// URL is malformed, or a timeout is zero.
    pub fn validate_config(&self) -> Result<(), Error> {
        if self.token().is_none() {
            return Err(Error::ConfigError(MISSING_TOKEN_MESSAGE.to_string()));
        }

        self.validate()?;
        Ok(())
    }

    /// Parse the base URL.
    ///
    /// A trailing `/` is added when missing so that relative endpoint paths
    /// extend the base path instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut raw = self.api_base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid API base URL: {e}")))
    }
}

impl Default for DoohlyConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            open_timeout_secs: default_open_timeout_secs(),
            log_requests: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DoohlyConfig::default();
        assert_eq!(config.api_base_url, "https://api.dooh.ly/api/public");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.open_timeout(), Duration::from_secs(10));
        assert!(config.api_token.is_none());
        assert!(!config.log_requests);
    }

    #[test]
    fn test_validate_missing_token() {
        let err = DoohlyConfig::default().validate_config().unwrap_err();
        assert_eq!(err, Error::ConfigError("API token is required".to_string()));
    }

    #[test]
    fn test_validate_empty_token() {
        let err = DoohlyConfig::new("").validate_config().unwrap_err();
        assert_eq!(err, Error::ConfigError("API token is required".to_string()));
    }

    #[test]
    fn test_validate_with_token() {
        assert!(DoohlyConfig::new("test_token").validate_config().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DoohlyConfig::new("tok")
            .with_base_url("http://localhost:9000/api")
            .with_timeout(60)
            .with_open_timeout(5)
            .with_request_logging(true);

        assert_eq!(config.token(), Some("tok"));
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.open_timeout_secs, 5);
        assert!(config.log_requests);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let err = DoohlyConfig::new("tok")
            .with_base_url("not-a-url")
            .validate_config()
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let err = DoohlyConfig::new("tok").with_timeout(0).validate_config().unwrap_err();
        assert!(err.is_config_error());

        let err = DoohlyConfig::new("tok")
            .with_open_timeout(0)
            .validate_config()
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_accepts_long_timeouts() {
        let config = DoohlyConfig::new("tok").with_timeout(600).with_open_timeout(300);
        assert!(config.validate_config().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_parse_base_url_keeps_path() {
        let config = DoohlyConfig::default();
        let base = config.parse_base_url().unwrap();
        assert_eq!(base.as_str(), "https://api.dooh.ly/api/public/");
        assert_eq!(
            base.join("v1/devices").unwrap().as_str(),
            "https://api.dooh.ly/api/public/v1/devices"
        );
    }

    #[test]
    fn test_parse_base_url_with_trailing_slash() {
        let config = DoohlyConfig::default().with_base_url("http://localhost:8080/");
        let base = config.parse_base_url().unwrap();
        assert_eq!(
            base.join("v2/bookings").unwrap().as_str(),
            "http://localhost:8080/v2/bookings"
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = DoohlyConfig::new("secret").with_timeout(45);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DoohlyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: DoohlyConfig = serde_json::from_str(r#"{"api_token":"abc"}"#).unwrap();
        assert_eq!(config.token(), Some("abc"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT);
        assert_eq!(config.open_timeout_secs, DEFAULT_OPEN_TIMEOUT);
    }
}
