//! Configuration module for the Voice Lab server
//!
//! Configuration comes from environment variables (a `.env` file is loaded into the
//! environment by `main`) and an optional YAML file. Priority: YAML > ENV vars >
//! defaults.
//!
//! None of these settings reach the user: the provider API key is entered in the
//! browser and lives only in the session.
//!
//! # Example
//! ```rust,no_run
//! use voicelab::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::core::provider::ELEVENLABS_BASE_URL;
use crate::utils::{UrlValidationError, validate_http_url};

mod yaml;

pub use yaml::YamlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECONDS: u64 = 3600;
pub const DEFAULT_MAX_SESSIONS: u64 = 10_000;

/// Errors produced while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Invalid provider base URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Origin of the ElevenLabs API; overridable to target a mock or proxy
    pub provider_base_url: Url,

    /// A session untouched for this long ends and its state is destroyed
    pub session_idle_timeout_seconds: u64,
    /// Upper bound on concurrently held sessions
    pub max_sessions: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `3001` |
    /// | `ELEVENLABS_BASE_URL` | `https://api.elevenlabs.io` |
    /// | `SESSION_IDLE_TIMEOUT_SECONDS` | `3600` |
    /// | `MAX_SESSIONS` | `10000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::merge(None)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Environment variables provide base values and the YAML file overrides them.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        Self::merge(Some(yaml_config))
    }

    fn merge(yaml: Option<YamlConfig>) -> Result<Self, ConfigError> {
        let yaml = yaml.unwrap_or_default();
        let server = yaml.server.unwrap_or_default();
        let provider = yaml.provider.unwrap_or_default();
        let session = yaml.session.unwrap_or_default();

        let host = server
            .host
            .or_else(|| env_var("HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match server.port {
            Some(port) => port,
            None => parse_env("PORT")?.unwrap_or(DEFAULT_PORT),
        };

        let base_url = provider
            .base_url
            .or_else(|| env_var("ELEVENLABS_BASE_URL"))
            .unwrap_or_else(|| ELEVENLABS_BASE_URL.to_string());
        let provider_base_url: Url = validate_http_url(&base_url)?;

        let session_idle_timeout_seconds = match session.idle_timeout_seconds {
            Some(secs) => secs,
            None => parse_env("SESSION_IDLE_TIMEOUT_SECONDS")?
                .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT_SECONDS),
        };

        let max_sessions = match session.max_sessions {
            Some(max) => max,
            None => parse_env("MAX_SESSIONS")?.unwrap_or(DEFAULT_MAX_SESSIONS),
        };

        let config = Self {
            host,
            port,
            provider_base_url,
            session_idle_timeout_seconds,
            max_sessions,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session_idle_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                name: "session_idle_timeout_seconds",
                value: "0".to_string(),
            });
        }
        if self.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_sessions",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_seconds)
    }
}

/// Read a non-empty, trimmed environment variable.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    env_var(name)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name, value })
        })
        .transpose()
}
