use serde::{Deserialize, Serialize};

/// Attempts per word when nothing else is configured
pub const DEFAULT_MAX_RETRIES: u32 = 3;

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-5".to_string()
}

fn default_timeout_seconds() -> u64 {
    180
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// Settings for the language model backend
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BackendConfig {
    /// Credential sent as a bearer token
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Left out of the request when unset
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Attempts per word before giving up on corrupted output
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl BackendConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: default_api_url(),
            model: default_model(),
            temperature: None,
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}
