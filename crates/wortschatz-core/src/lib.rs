pub mod corruption;
pub mod generator;
pub mod pipeline;
pub mod prompt;
pub mod store;
pub mod words;

#[cfg(test)]
mod test_support;

pub use corruption::{Corruption, find_corruption, is_corrupted};
pub use generator::{GenerationError, Generator, entry_schema};
pub use pipeline::{Pipeline, RunOptions, RunSummary, WordOutcome};
pub use prompt::PromptTemplate;
pub use store::{ErrorRecord, StoreError, StoredRecord, WordStore};
pub use words::{load_words, normalize_word, parse_words};
