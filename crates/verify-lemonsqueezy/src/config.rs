//! # LemonSqueezy Configuration
//!
//! Configuration management for the LemonSqueezy integration.
//! The API key is loaded from the environment and never logged.

use std::env;
use std::fmt;
use std::time::Duration;
use verify_core::VerifyError;

/// Default API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.lemonsqueezy.com";

/// JSON:API media type the LemonSqueezy API speaks
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Default outbound request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// LemonSqueezy API configuration
#[derive(Clone)]
pub struct LemonSqueezyConfig {
    /// API key (bearer token)
    pub api_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Outbound request timeout
    pub timeout: Duration,
}

impl LemonSqueezyConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `LS_API_KEY`
    ///
    /// Optional:
    /// - `LS_API_BASE_URL` (default `https://api.lemonsqueezy.com`)
    /// - `LS_HTTP_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, VerifyError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`LemonSqueezyConfig::from_env`], reading through `vars`.
    ///
    /// An empty `LS_API_KEY` counts as missing.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, VerifyError> {
        let api_key = vars("LS_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or(VerifyError::MissingCredential("LS_API_KEY"))?;

        let api_base_url =
            vars("LS_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match vars("LS_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                VerifyError::Configuration(format!(
                    "LS_HTTP_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create config with an explicit key (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for LemonSqueezyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LemonSqueezyConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LemonSqueezyConfig::new("ls_key");
        assert_eq!(config.api_base_url, "https://api.lemonsqueezy.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_auth_header() {
        let config = LemonSqueezyConfig::new("ls_key");
        assert_eq!(config.auth_header(), "Bearer ls_key");
    }

    #[test]
    fn test_builders() {
        let config = LemonSqueezyConfig::new("ls_key")
            .with_api_base_url("http://127.0.0.1:9000")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    fn vars_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_from_vars_reads_overrides() {
        let config = LemonSqueezyConfig::from_vars(vars_from(&[
            ("LS_API_KEY", "ls_key"),
            ("LS_API_BASE_URL", "http://127.0.0.1:9000"),
            ("LS_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "ls_key");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_vars_missing_or_empty_key() {
        for pairs in [vec![], vec![("LS_API_KEY", "")]] {
            let err = LemonSqueezyConfig::from_vars(vars_from(&pairs)).unwrap_err();
            assert!(matches!(err, VerifyError::MissingCredential("LS_API_KEY")));
            assert_eq!(err.status_code(), 500);
        }
    }

    #[test]
    fn test_from_vars_malformed_timeout() {
        for raw in ["", "soon", "-1", "1.5"] {
            let err = LemonSqueezyConfig::from_vars(vars_from(&[
                ("LS_API_KEY", "ls_key"),
                ("LS_HTTP_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, VerifyError::Configuration(_)), "{:?}", raw);
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = LemonSqueezyConfig::new("ls_very_secret");
        assert!(!format!("{:?}", config).contains("ls_very_secret"));
    }
}
