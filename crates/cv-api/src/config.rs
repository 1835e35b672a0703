//! Server configuration from the environment

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CORPUS_DIR: &str = "./corpus";

/// Origins that are always allowed, besides `FRONTEND_URL`.
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost", "http://localhost:5173"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub frontend_url: String,
    pub pipeline: PipelineConfig,
}

/// Retrieval and generation settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub api_key: String,
    pub model: String,
    pub gemini_base_url: String,
    pub corpus_dir: PathBuf,
    /// Translate corpus documents from Norwegian before indexing
    pub translate_corpus: bool,
    /// Longest piece of text sent in one translation request
    pub translate_segment_chars: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = get("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let frontend_url = get("FRONTEND_URL", DEFAULT_FRONTEND_URL)
            .trim_end_matches('/')
            .to_string();
        if axum::http::HeaderValue::from_str(&frontend_url).is_err() {
            return Err(ConfigError::Invalid {
                key: "FRONTEND_URL",
                reason: "not a valid origin header value".to_string(),
            });
        }

        let api_key = lookup("GOOGLE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("GOOGLE_API_KEY"))?;

        let translate_corpus = match get("CORPUS_TRANSLATE", "false").to_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            other => {
                return Err(ConfigError::Invalid {
                    key: "CORPUS_TRANSLATE",
                    reason: format!("expected true or false, got '{}'", other),
                })
            }
        };

        Ok(Self {
            bind_addr,
            frontend_url,
            pipeline: PipelineConfig {
                api_key,
                model: get("GEMINI_MODEL", DEFAULT_MODEL),
                gemini_base_url: get("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                corpus_dir: PathBuf::from(get("CORPUS_DIR", DEFAULT_CORPUS_DIR)),
                translate_corpus,
                translate_segment_chars: 4000,
                chunk_size: 1000,
                chunk_overlap: 100,
                top_k: 7,
            },
        })
    }

    /// CORS origins: the local dev origins plus the deployed front end.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = LOCAL_ORIGINS.iter().map(|o| o.to_string()).collect();
        if !origins.contains(&self.frontend_url) {
            origins.push(self.frontend_url.clone());
        }
        origins
    }
}
