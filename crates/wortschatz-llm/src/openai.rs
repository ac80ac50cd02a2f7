use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use wortschatz_config::BackendConfig;

use crate::{BackendError, BackendMetadata, StructuredCompletion, TargetSchema};

/// OpenAI chat-completions backend using `json_schema` structured output
#[derive(Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: Option<f32>,
    timeout_seconds: u64,
}

impl OpenAiBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout_seconds: config.timeout_seconds,
        })
    }

    fn request_body(&self, prompt: &str, schema: &TargetSchema) -> serde_json::Value {
        let mut body = json!({
            "model": &self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": &schema.name,
                    "description": &schema.description,
                    "schema": &schema.schema,
                    "strict": false
                }
            }
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }

    fn transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout(self.timeout_seconds)
        } else {
            BackendError::Network(e)
        }
    }
}

#[async_trait]
impl StructuredCompletion for OpenAiBackend {
    async fn complete(
        &self,
        prompt: &str,
        schema: &TargetSchema,
    ) -> Result<serde_json::Value, BackendError> {
        if self.api_key.is_empty() {
            return Err(BackendError::Authentication);
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt, schema))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if let Some(err) = status_error(status, &text) {
            return Err(err);
        }

        tracing::trace!("OpenAI response: {} bytes", text.len());
        parse_completion(&text)
    }

    fn metadata(&self) -> BackendMetadata {
        BackendMetadata {
            provider: "openai".to_string(),
            model: self.model.clone(),
        }
    }
}

fn status_error(status: StatusCode, body: &str) -> Option<BackendError> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Authentication,
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimitExceeded,
        _ => BackendError::Api(format!("HTTP {}: {}", status, body.trim())),
    })
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

/// Pull the structured JSON out of a chat-completions response body
fn parse_completion(text: &str) -> Result<serde_json::Value, BackendError> {
    let response: ApiResponse = serde_json::from_str(text).map_err(|e| {
        BackendError::MalformedResponse(format!("Failed to parse response: {}", e))
    })?;

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| BackendError::MalformedResponse("No choices in response".to_string()))?;

    if let Some(refusal) = message.refusal {
        return Err(BackendError::MalformedResponse(format!(
            "Model refused: {}",
            refusal
        )));
    }

    let content = message
        .content
        .ok_or_else(|| BackendError::MalformedResponse("Empty message content".to_string()))?;

    serde_json::from_str(&content).map_err(|e| {
        BackendError::MalformedResponse(format!("Content is not valid JSON: {}", e))
    })
}
