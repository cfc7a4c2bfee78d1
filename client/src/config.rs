//! Client configuration.
//!
//! The base URL of the todo API is resolved once at startup and never changes
//! afterwards.

use crate::error::ConfigError;
use reqwest::Url;

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "TASKSYNC_API_URL";

/// Base URL used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Immutable client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: String,
}

impl ClientConfig {
    /// Builds a configuration from an explicit base URL
    ///
    /// One trailing slash is stripped so paths can be appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse and
    /// [`ConfigError::UnsupportedScheme`] if it is not http or https.
    pub fn new(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = api_url.into();
        let trimmed = raw.trim();
        let api_url = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();

        let parsed = Url::parse(&api_url).map_err(|e| ConfigError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(Self { api_url }),
            other => Err(ConfigError::UnsupportedScheme {
                scheme: other.to_string(),
            }),
        }
    }

    /// Loads configuration from the process environment
    ///
    /// Reads [`API_URL_ENV`]; an unset or blank value falls back to
    /// [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
