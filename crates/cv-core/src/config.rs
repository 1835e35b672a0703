//! Client configuration

use crate::VALIDATE_CLAIM_PATH;
use thiserror::Error;
use url::Url;

/// Environment key holding the verification service base URL.
pub const API_BASE_URL_ENV: &str = "CLAIM_VERIFIER_API_BASE_URL";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CLAIM_VERIFIER_API_BASE_URL is not set")]
    MissingBaseUrl,

    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

/// Where the verification service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: Url,
}

impl ClientConfig {
    /// Validate a base URL such as `http://localhost:8000`.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let api_base_url = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

        match api_base_url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        if api_base_url.query().is_some() || api_base_url.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                value: raw.to_string(),
                reason: "query and fragment are not allowed".to_string(),
            });
        }

        let joined = format!(
            "{}/{}",
            api_base_url.as_str().trim_end_matches('/'),
            VALIDATE_CLAIM_PATH
        );
        let endpoint = Url::parse(&joined).map_err(|e| ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { endpoint })
    }

    /// Build from a value that may be absent, e.g. `option_env!` at compile time.
    pub fn from_optional(raw: Option<&str>) -> Result<Self, ConfigError> {
        Self::new(raw.ok_or(ConfigError::MissingBaseUrl)?)
    }

    /// Read [`API_BASE_URL_ENV`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_optional(std::env::var(API_BASE_URL_ENV).ok().as_deref())
    }

    /// Full URL of the verification endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}
