use std::fmt;

use wortschatz_types::WordEntry;

/// Fragments of JSON syntax that should never appear in prose fields. Their
/// presence means the model rendered structure into a string value.
pub const JSON_ARTIFACTS: [&str; 5] = ["},{", "{\"", "\"}", "[{", "}]"];

/// First leaked fragment found in an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corruption {
    /// Dotted path of the offending field, e.g. `meanings[0].examples[1].en`
    pub field: String,
    pub artifact: &'static str,
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contains {:?}", self.field, self.artifact)
    }
}

pub fn is_corrupted(entry: &WordEntry) -> bool {
    find_corruption(entry).is_some()
}

/// Scan the textual leaves of an entry and report the first one carrying a
/// JSON artifact. The headword and grammatical fields are not scanned.
pub fn find_corruption(entry: &WordEntry) -> Option<Corruption> {
    text_leaves(entry).find_map(|(field, text)| {
        JSON_ARTIFACTS
            .iter()
            .copied()
            .find(|artifact| text.contains(artifact))
            .map(|artifact| Corruption { field, artifact })
    })
}

fn text_leaves(entry: &WordEntry) -> impl Iterator<Item = (String, &str)> {
    let summary = [
        ("summary.en".to_string(), entry.summary.en.as_str()),
        ("summary.cn".to_string(), entry.summary.cn.as_str()),
    ];

    let meanings = entry.meanings.iter().enumerate().flat_map(|(i, meaning)| {
        let glosses = [
            (format!("meanings[{i}].en"), meaning.en.as_str()),
            (format!("meanings[{i}].cn"), meaning.cn.as_str()),
        ];
        let examples = meaning.examples.iter().enumerate().flat_map(move |(j, ex)| {
            triple(
                format!("meanings[{i}].examples[{j}]"),
                &ex.de,
                &ex.en,
                &ex.cn,
            )
        });
        glosses.into_iter().chain(examples)
    });

    let collocations = entry
        .collocations
        .iter()
        .enumerate()
        .flat_map(|(i, c)| triple(format!("collocations[{i}]"), &c.de, &c.en, &c.cn));

    let related = entry
        .related_words
        .iter()
        .flatten()
        .enumerate()
        .flat_map(|(i, w)| triple(format!("related_words[{i}]"), &w.de, &w.en, &w.cn));

    summary
        .into_iter()
        .chain(meanings)
        .chain(collocations)
        .chain(related)
}

fn triple<'a>(prefix: String, de: &'a str, en: &'a str, cn: &'a str) -> [(String, &'a str); 3] {
    [
        (format!("{prefix}.de"), de),
        (format!("{prefix}.en"), en),
        (format!("{prefix}.cn"), cn),
    ]
}
