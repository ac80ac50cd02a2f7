//! Fixtures shared by the unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use wortschatz_llm::{BackendError, BackendMetadata, StructuredCompletion, TargetSchema};
use wortschatz_types::WordEntry;

type Responder = Box<dyn Fn(&str) -> Result<Value, BackendError> + Send + Sync>;

/// Record of every request a scripted backend received
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(String, String)>>>);

impl CallLog {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn schema_names(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }
}

/// In-memory backend that replays queued responses, then falls back to a
/// responder function if one is set.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<Value, BackendError>>>,
    fallback: Option<Responder>,
    log: CallLog,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Result<Value, BackendError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            log: CallLog::default(),
        }
    }

    pub fn repeating(value: Value) -> Self {
        Self::responding(move |_| Ok(value.clone()))
    }

    pub fn responding<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<Value, BackendError> + Send + Sync + 'static,
    {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(Box::new(responder)),
            log: CallLog::default(),
        }
    }

    pub fn calls(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait::async_trait]
impl StructuredCompletion for ScriptedBackend {
    async fn complete(&self, prompt: &str, schema: &TargetSchema) -> Result<Value, BackendError> {
        self.log
            .0
            .lock()
            .unwrap()
            .push((prompt.to_string(), schema.name.clone()));

        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }

        match &self.fallback {
            Some(responder) => responder(prompt),
            None => Err(BackendError::Api("no scripted response left".to_string())),
        }
    }

    fn metadata(&self) -> BackendMetadata {
        BackendMetadata {
            provider: "scripted".to_string(),
            model: "none".to_string(),
        }
    }
}

pub fn sample_value(word: &str) -> Value {
    json!({
        "de": word,
        "part_of_speech": "Nomen",
        "gender": "der",
        "is_separable": null,
        "summary": {
            "en": "A round fruit that grows on trees.",
            "cn": "一种长在树上的圆形水果。"
        },
        "meanings": [{
            "en": "apple",
            "cn": "苹果",
            "examples": [{
                "de": "Der Apfel ist süß.",
                "en": "The apple is sweet.",
                "cn": "这个苹果很甜。"
            }]
        }],
        "collocations": [{
            "de": "in den sauren Apfel beißen",
            "en": "to bite the bullet",
            "cn": "硬着头皮做"
        }],
        "related_words": null
    })
}

/// Structurally valid entry with leaked JSON in an example translation
pub fn corrupted_value(word: &str) -> Value {
    let mut value = sample_value(word);
    value["meanings"][0]["examples"][0]["en"] = json!("The apple is sweet.\"},{\"de\":");
    value
}

pub fn sample_entry(word: &str) -> WordEntry {
    WordEntry::from_value(sample_value(word)).unwrap()
}

/// Pull the word back out of a rendered prompt
pub fn prompt_word(prompt: &str) -> &str {
    prompt
        .rsplit_once(crate::prompt::WORD_MARKER)
        .map(|(_, word)| word.trim())
        .unwrap_or_default()
}
