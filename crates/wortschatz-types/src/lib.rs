mod entry;

pub use entry::{
    Collocation, ExampleSentence, Meaning, PartOfSpeech, RelatedWord, Summary, WordEntry,
};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("response does not match the entry schema: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("entry violates field constraints: {0}")]
    Constraint(#[from] validator::ValidationErrors),
}
