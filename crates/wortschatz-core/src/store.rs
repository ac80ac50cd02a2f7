use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wortschatz_types::WordEntry;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid word for storage: {0:?}")]
    InvalidWord(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Payload written in place of an entry when generation fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
}

/// Contents of a stored word file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Error(ErrorRecord),
    Entry(Box<WordEntry>),
}

impl StoredRecord {
    pub fn is_error(&self) -> bool {
        matches!(self, StoredRecord::Error(_))
    }
}

/// One JSON file per word under `<root>/<first letter>/`
#[derive(Debug, Clone)]
pub struct WordStore {
    root: PathBuf,
}

impl WordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Bucket by the uppercased first character, then `<word>.json`.
    pub fn path_for(&self, word: &str) -> Result<PathBuf, StoreError> {
        let first = word
            .chars()
            .next()
            .ok_or_else(|| StoreError::InvalidWord(word.to_string()))?;

        if word == "." || word == ".." || word.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidWord(word.to_string()));
        }

        let bucket: String = first.to_uppercase().collect();
        Ok(self.root.join(bucket).join(format!("{word}.json")))
    }

    pub fn exists(&self, word: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(word)?.exists())
    }

    pub fn write_entry(&self, word: &str, entry: &WordEntry) -> Result<PathBuf, StoreError> {
        self.write_json(word, entry)
    }

    pub fn write_error(&self, word: &str, message: &str) -> Result<PathBuf, StoreError> {
        let record = ErrorRecord {
            error: message.to_string(),
        };
        self.write_json(word, &record)
    }

    /// Read back whatever is stored for a word, if anything.
    pub fn read(&self, word: &str) -> Result<Option<StoredRecord>, StoreError> {
        let path = self.path_for(word)?;
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Pretty JSON, written beside the target and renamed over it so an
    /// existing file is either fully replaced or left as it was.
    fn write_json<T: Serialize>(&self, word: &str, value: &T) -> Result<PathBuf, StoreError> {
        let path = self.path_for(word)?;
        let json = serde_json::to_string_pretty(value)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes()).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}
