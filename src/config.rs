//! Client configuration.
//!
//! A [`Config`] is resolved once from [`ConfigOptions`] and then owned,
//! read-only, by the transport. Each setting is taken from the explicit
//! option if given, otherwise from its environment variable, otherwise from
//! the built-in default. Empty environment values count as unset.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const ENV_API_URL: &str = "ABACATEPAY_API_URL";
pub const ENV_API_VERSION: &str = "ABACATEPAY_API_VERSION";
pub const ENV_API_KEY: &str = "ABACATEPAY_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "ABACATEPAY_TIMEOUT_SECS";

/// Errors raised while resolving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API URL `{value}`: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API URL `{0}` cannot be used as a base URL")]
    NotABaseUrl(String),
    #[error("API version must not be empty")]
    EmptyApiVersion,
    #[error("invalid {var} value `{value}`: expected whole seconds")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Resolved, immutable client configuration.
#[derive(Clone)]
pub struct Config {
    api_url: Url,
    api_version: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url.as_str())
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    /// Resolves the configuration from the process environment and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigOptions::default().resolve()
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Per-request timeout. `None` disables it.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Explicitly supplied configuration values. Every field is optional.
///
/// Can be deserialized from a configuration file:
///
/// ```json
/// { "api_key": "abc_dev_...", "timeout_secs": 10 }
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOptions {
    pub api_url: Option<String>,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
    /// Request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl fmt::Debug for ConfigOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOptions")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Resolves against the process environment.
    pub fn resolve(self) -> Result<Config, ConfigError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves against the given environment lookup.
    pub fn resolve_with<F>(self, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_url = self
            .api_url
            .or_else(|| env(ENV_API_URL))
            .unwrap_or_else(config_defaults::api_url);
        let api_url = parse_api_url(&api_url)?;

        let api_version = self
            .api_version
            .or_else(|| env(ENV_API_VERSION))
            .unwrap_or_else(config_defaults::api_version);
        let api_version = api_version.trim().trim_start_matches('v').to_string();
        if api_version.is_empty() {
            return Err(ConfigError::EmptyApiVersion);
        }

        let api_key = self.api_key.or_else(|| env(ENV_API_KEY));

        let timeout_secs = match self.timeout_secs {
            Some(secs) => secs,
            None => match env(ENV_TIMEOUT_SECS) {
                Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                    var: ENV_TIMEOUT_SECS,
                    value,
                })?,
                None => config_defaults::TIMEOUT_SECS,
            },
        };
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let user_agent = self.user_agent.unwrap_or_else(config_defaults::user_agent);

        Ok(Config {
            api_url,
            api_version,
            api_key,
            timeout,
            user_agent,
        })
    }
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABaseUrl(value.to_string()));
    }
    Ok(url)
}

pub mod config_defaults {
    pub const API_URL: &str = "https://api.abacatepay.com";
    pub const API_VERSION: &str = "1";
    pub const TIMEOUT_SECS: u64 = 30;

    pub fn api_url() -> String {
        API_URL.to_string()
    }

    pub fn api_version() -> String {
        API_VERSION.to_string()
    }

    pub fn user_agent() -> String {
        format!("abacatepay-rust/{}", env!("CARGO_PKG_VERSION"))
    }
}
