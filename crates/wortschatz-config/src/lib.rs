use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use self::backend::{BackendConfig, DEFAULT_MAX_RETRIES};
pub use self::store::StoreConfig;

pub mod backend;
pub mod store;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Build the config from the process environment, reading `.env` first
    /// when one exists in the working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        let mut backend = BackendConfig::new(api_key);
        if let Some(url) = lookup("OPENAI_API_URL") {
            backend.api_url = url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            backend.model = model;
        }
        backend.temperature = parse_optional(&lookup, "OPENAI_TEMPERATURE")?;
        if let Some(timeout) = parse_optional(&lookup, "OPENAI_TIMEOUT_SECONDS")? {
            backend.timeout_seconds = timeout;
        }
        if let Some(retries) = parse_optional(&lookup, "WORTSCHATZ_MAX_RETRIES")? {
            backend.max_retries = retries;
        }

        let mut store = StoreConfig::default();
        if let Some(dir) = lookup("WORTSCHATZ_DATA_DIR") {
            store.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("WORTSCHATZ_PROMPT_FILE") {
            store.prompt_file = PathBuf::from(file);
        }

        let config = Config { backend, store };
        config.check()?;
        Ok(config)
    }

    /// Reject values that parse but make no sense to run with.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.backend.max_retries == 0 {
            return Err(ConfigError::Invalid {
                key: "WORTSCHATZ_MAX_RETRIES",
                value: "0".to_string(),
            });
        }
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "OPENAI_TIMEOUT_SECONDS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_optional<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
