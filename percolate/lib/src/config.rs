//! Client configuration.
//!
//! A [`ClientConfig`] is built once and never mutated. Only the API key is
//! required; the base URL and timeout default to the public API endpoint and
//! ten seconds.
//!
//! ## Examples
//!
//! ```rust
//! use std::time::Duration;
//! use percolate::ClientConfig;
//!
//! let config = ClientConfig::builder("ABC123")
//!     .base_url("http://localhost:8080/api/v3")
//!     .timeout(Duration::from_secs(2))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_str(), "http://localhost:8080/api/v3/");
//! ```

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Default endpoint of the Percolate API.
pub const DEFAULT_BASE_URL: &str = "http://percolate.com/api/v3/";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "PERCOLATE_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "PERCOLATE_BASE_URL";
/// Environment variable overriding the timeout, in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "PERCOLATE_TIMEOUT_MS";

/// Immutable configuration for a Percolate client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with default base URL and timeout.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(api_key).build()
    }

    /// Creates a builder for overriding the base URL or timeout.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// - `PERCOLATE_API_KEY` (required)
    /// - `PERCOLATE_BASE_URL` (optional)
    /// - `PERCOLATE_TIMEOUT_MS` (optional)
    ///
    /// ## Errors
    ///
    /// Returns an error if the key is missing or an override is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| ConfigError::MissingApiKey)?;
        let mut builder = Self::builder(api_key);

        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        if let Ok(timeout) = env::var(TIMEOUT_MS_ENV) {
            builder = builder.timeout(parse_timeout_ms(&timeout)?);
        }

        builder.build()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The base URL, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// The API key stays out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClientConfigBuilder {
    /// Overrides the base URL. A trailing `/` is added when missing.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingApiKey`] if the key is blank
    /// - [`ConfigError::InvalidBaseUrl`] if the URL is not absolute http(s)
    /// - [`ConfigError::InvalidTimeout`] if the timeout is zero
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }

        Ok(ClientConfig {
            api_key,
            base_url: normalize_base_url(&self.base_url)?,
            timeout: self.timeout,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
