use schemars::JsonSchema;
use serde::Serialize;

mod openai;

pub use openai::OpenAiBackend;

/// Structured completion interface: given a prompt and a target schema,
/// return a JSON value that is meant to conform to that schema.
///
/// Conformance is checked by the caller; implementations only guarantee
/// that the returned value is well-formed JSON.
#[async_trait::async_trait]
pub trait StructuredCompletion: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        schema: &TargetSchema,
    ) -> Result<serde_json::Value, BackendError>;

    /// Provider metadata
    fn metadata(&self) -> BackendMetadata;
}

/// Schema handed to the backend alongside the prompt
#[derive(Debug, Clone, Serialize)]
pub struct TargetSchema {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

impl TargetSchema {
    pub fn for_type<T: JsonSchema>(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            schema: schemars::schema_for!(T).to_value(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendMetadata {
    pub provider: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    Authentication,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
