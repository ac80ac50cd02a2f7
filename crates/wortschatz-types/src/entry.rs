use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Grammatical category of a headword, labelled the way German grammars do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PartOfSpeech {
    #[serde(rename = "Nomen")]
    Noun,
    #[serde(rename = "Verb")]
    Verb,
    #[serde(rename = "Adjektiv/Adverb")]
    AdjectiveAdverb,
    #[serde(rename = "Adverb")]
    Adverb,
    #[serde(rename = "Pronomen")]
    Pronoun,
    #[serde(rename = "Präposition")]
    Preposition,
    #[serde(rename = "Konjunktion")]
    Conjunction,
    #[serde(rename = "Artikel")]
    Article,
    #[serde(rename = "Numerale")]
    Numeral,
    #[serde(rename = "Interjektion")]
    Interjection,
    #[serde(rename = "Partikel")]
    Particle,
}

/// Short overview of the word in both target languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Summary {
    /// One or two sentences in English describing the word and its main use. At most 200 characters.
    #[validate(length(max = 200))]
    pub en: String,
    /// The same summary in Chinese. At most 150 characters.
    #[validate(length(max = 150))]
    pub cn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExampleSentence {
    /// German example sentence
    pub de: String,
    /// English translation
    pub en: String,
    /// Chinese translation
    pub cn: String,
}

/// ONE distinct meaning of the word. If a word has multiple meanings, create multiple Meaning objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Meaning {
    /// English translation for THIS meaning only.
    pub en: String,
    /// Chinese translation for THIS meaning only.
    pub cn: String,
    /// 1-3 example sentences for THIS meaning.
    #[validate(length(min = 1, max = 3))]
    pub examples: Vec<ExampleSentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Collocation {
    /// German collocation phrase
    pub de: String,
    /// English meaning
    pub en: String,
    /// Chinese meaning
    pub cn: String,
}

/// Synonym, antonym, or otherwise relevant word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RelatedWord {
    /// Related German word
    pub de: String,
    /// English meaning
    pub en: String,
    /// Chinese meaning
    pub cn: String,
}

/// Dictionary entry for a single German word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct WordEntry {
    /// The German word
    pub de: String,
    /// Part of speech
    pub part_of_speech: PartOfSpeech,
    /// der/die/das for nouns
    pub gender: Option<String>,
    /// True if the verb is trennbar
    pub is_separable: Option<bool>,
    /// Short English and Chinese overview of the word
    #[validate(nested)]
    pub summary: Summary,
    /// A German word can have multiple different meanings. Explain them in different Meaning
    /// objects, ordered by usage frequency so that the first one is the most used meaning.
    /// Give each meaning in English and Chinese with 1-3 example sentences, and translate every
    /// example sentence into English and Chinese.
    #[validate(length(min = 1), nested)]
    pub meanings: Vec<Meaning>,
    /// Up to 10 common collocations of the German word. For verbs, consider usage with
    /// Nominativ, Genitiv, Dativ and Akkusativ, and reflexive usage. Give each collocation's
    /// meaning in English and Chinese.
    #[validate(length(max = 10))]
    pub collocations: Vec<Collocation>,
    /// Relevant words: synonyms, antonyms and associated words, up to 3 of each, all optional.
    /// Do not mark the category, e.g. (Synonym), in the German word or its translations.
    pub related_words: Option<Vec<RelatedWord>>,
}

impl WordEntry {
    /// Build an entry from raw backend output, rejecting anything that does not
    /// match the schema or breaks a length constraint.
    pub fn from_value(value: serde_json::Value) -> Result<Self, crate::SchemaError> {
        let entry: WordEntry = serde_json::from_value(value)?;
        entry.validate()?;
        Ok(entry)
    }
}
