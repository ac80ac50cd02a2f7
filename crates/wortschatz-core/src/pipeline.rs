use std::path::PathBuf;

use crate::generator::Generator;
use crate::prompt::PromptTemplate;
use crate::store::{StoreError, WordStore};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Regenerate words that already have a file
    pub force: bool,
    /// Regenerate words whose file holds an error record
    pub retry_failed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WordOutcome {
    Skipped,
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
}

impl RunSummary {
    fn record(&mut self, word: &str, outcome: &WordOutcome) {
        match outcome {
            WordOutcome::Skipped => self.skipped += 1,
            WordOutcome::Saved(_) => self.saved += 1,
            WordOutcome::Failed(_) => self.failed.push(word.to_string()),
        }
    }
}

/// Sequential batch: check the store, generate, persist, one word at a time.
pub struct Pipeline {
    generator: Generator,
    store: WordStore,
    template: PromptTemplate,
    options: RunOptions,
}

impl Pipeline {
    pub fn new(
        generator: Generator,
        store: WordStore,
        template: PromptTemplate,
        options: RunOptions,
    ) -> Self {
        Self {
            generator,
            store,
            template,
            options,
        }
    }

    pub async fn run(&self, words: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();

        for (i, word) in words.iter().enumerate() {
            tracing::debug!("Word {}/{}: {}", i + 1, words.len(), word);
            let outcome = self.process(word).await;
            summary.record(word, &outcome);
        }

        summary
    }

    /// Handle a single word. Failures never escape: they are written as an
    /// error record and reported in the outcome.
    pub async fn process(&self, word: &str) -> WordOutcome {
        match self.needs_processing(word) {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("Skipping {} (already exists)", word);
                return WordOutcome::Skipped;
            }
            Err(e) => {
                tracing::error!("Cannot process {}: {}", word, e);
                return WordOutcome::Failed(e.to_string());
            }
        }

        tracing::info!("Processing: {}", word);

        let message = match self.generator.generate(word, &self.template).await {
            Ok(entry) => match self.store.write_entry(word, &entry) {
                Ok(path) => {
                    tracing::info!("Saved: {}", path.display());
                    return WordOutcome::Saved(path);
                }
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        tracing::error!("Error processing {}: {}", word, message);
        match self.store.write_error(word, &message) {
            Ok(path) => tracing::info!("Saved error record: {}", path.display()),
            Err(e) => tracing::error!("Could not record failure for {}: {}", word, e),
        }

        WordOutcome::Failed(message)
    }

    fn needs_processing(&self, word: &str) -> Result<bool, StoreError> {
        if self.options.force || !self.store.exists(word)? {
            return Ok(true);
        }

        if !self.options.retry_failed {
            return Ok(false);
        }

        match self.store.read(word) {
            Ok(Some(record)) => Ok(record.is_error()),
            Ok(None) => Ok(true),
            Err(e) => {
                tracing::warn!("Unreadable record for {}, regenerating: {}", word, e);
                Ok(true)
            }
        }
    }
}
