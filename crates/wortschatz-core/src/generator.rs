use wortschatz_llm::{BackendError, StructuredCompletion, TargetSchema};
use wortschatz_types::{SchemaError, WordEntry};

use crate::corruption::find_corruption;
use crate::prompt::PromptTemplate;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Failed after {attempts} retries due to corrupted output for {word}")]
    ExhaustedRetries { word: String, attempts: u32 },

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] SchemaError),
}

/// Produces validated entries from a structured completion backend,
/// retrying the same prompt while the output carries leaked JSON.
pub struct Generator {
    backend: Box<dyn StructuredCompletion>,
    schema: TargetSchema,
    max_retries: u32,
}

impl Generator {
    pub fn new(backend: Box<dyn StructuredCompletion>, max_retries: u32) -> Self {
        Self {
            backend,
            schema: entry_schema(),
            max_retries: max_retries.max(1),
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub async fn generate(
        &self,
        word: &str,
        template: &PromptTemplate,
    ) -> Result<WordEntry, GenerationError> {
        let prompt = template.render(word);

        for attempt in 1..=self.max_retries {
            tracing::debug!("Attempt {}/{} for {}", attempt, self.max_retries, word);

            let value = self.backend.complete(&prompt, &self.schema).await?;
            let entry = WordEntry::from_value(value)?;

            match find_corruption(&entry) {
                None => return Ok(entry),
                Some(corruption) => {
                    tracing::warn!(
                        "Corrupted output for {} on attempt {}: {}",
                        word,
                        attempt,
                        corruption
                    );
                }
            }
        }

        Err(GenerationError::ExhaustedRetries {
            word: word.to_string(),
            attempts: self.max_retries,
        })
    }
}

/// Target schema for a dictionary entry
pub fn entry_schema() -> TargetSchema {
    TargetSchema::for_type::<WordEntry>(
        "WordEntry",
        "Dictionary entry for a German word with English and Chinese explanations",
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{ScriptedBackend, corrupted_value, sample_value};

    fn template() -> PromptTemplate {
        PromptTemplate::from_content("Explain.\n")
    }

    #[tokio::test]
    async fn test_clean_first_attempt_makes_one_call() {
        let backend = ScriptedBackend::new(vec![Ok(sample_value("Apfel"))]);
        let calls = backend.calls();
        let generator = Generator::new(Box::new(backend), 3);

        let entry = generator.generate("Apfel", &template()).await.unwrap();
        assert_eq!(entry.de, "Apfel");
        assert_eq!(calls.count(), 1);
    }

    #[tokio::test]
    async fn test_clean_on_attempt_k_stops_at_k() {
        let backend = ScriptedBackend::new(vec![
            Ok(corrupted_value("Apfel")),
            Ok(corrupted_value("Apfel")),
            Ok(sample_value("Apfel")),
            Ok(sample_value("Apfel")),
        ]);
        let calls = backend.calls();
        let generator = Generator::new(Box::new(backend), 5);

        generator.generate("Apfel", &template()).await.unwrap();
        assert_eq!(calls.count(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_after_exactly_max_attempts() {
        let backend = ScriptedBackend::repeating(corrupted_value("Apfel"));
        let calls = backend.calls();
        let generator = Generator::new(Box::new(backend), 4);

        let err = generator.generate("Apfel", &template()).await.unwrap_err();
        match err {
            GenerationError::ExhaustedRetries { word, attempts } => {
                assert_eq!(word, "Apfel");
                assert_eq!(attempts, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(calls.count(), 4);
    }

    #[tokio::test]
    async fn test_same_prompt_every_attempt() {
        let backend = ScriptedBackend::repeating(corrupted_value("Haus"));
        let calls = backend.calls();
        let generator = Generator::new(Box::new(backend), 3);

        let _ = generator.generate("Haus", &template()).await;
        let prompts = calls.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts.iter().all(|p| p == "Explain.\nNow, explain the German word: Haus"));
    }

    #[tokio::test]
    async fn test_backend_error_not_retried() {
        let backend = ScriptedBackend::new(vec![
            Err(BackendError::RateLimitExceeded),
            Ok(sample_value("Apfel")),
        ]);
        let calls = backend.calls();
        let generator = Generator::new(Box::new(backend), 3);

        let err = generator.generate("Apfel", &template()).await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Backend(BackendError::RateLimitExceeded)
        ));
        assert_eq!(calls.count(), 1);
    }

    #[tokio::test]
    async fn test_schema_violation_not_retried() {
        let backend = ScriptedBackend::new(vec![
            Ok(json!({"de": "Apfel", "meanings": []})),
            Ok(sample_value("Apfel")),
        ]);
        let calls = backend.calls();
        let generator = Generator::new(Box::new(backend), 3);

        let err = generator.generate("Apfel", &template()).await.unwrap_err();
        assert!(matches!(err, GenerationError::ValidationFailed(_)));
        assert_eq!(calls.count(), 1);
    }

    #[tokio::test]
    async fn test_schema_sent_to_backend() {
        let backend = ScriptedBackend::new(vec![Ok(sample_value("Apfel"))]);
        let calls = backend.calls();
        let generator = Generator::new(Box::new(backend), 1);

        generator.generate("Apfel", &template()).await.unwrap();
        assert_eq!(calls.schema_names(), vec!["WordEntry".to_string()]);
    }

    #[test]
    fn test_zero_retries_still_attempts_once() {
        let generator = Generator::new(Box::new(ScriptedBackend::new(vec![])), 0);
        assert_eq!(generator.max_retries(), 1);
    }

    #[test]
    fn test_exhausted_message() {
        let err = GenerationError::ExhaustedRetries {
            word: "Apfel".to_string(),
            attempts: 3,
        };
        assert_eq!(
            err.to_string(),
            "Failed after 3 retries due to corrupted output for Apfel"
        );
    }
}
