use std::path::Path;

/// Closing instruction of the template; the word is substituted after it.
pub const WORD_MARKER: &str = "Now, explain the German word:";
const WORD_PLACEHOLDER: &str = "{word}";

/// Prompt text with a `{word}` placeholder at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Build a template from file content. Anything after the last word
    /// marker is replaced, so a template file may end with a worked example
    /// word without it leaking into real requests.
    pub fn from_content(content: &str) -> Self {
        let base = content
            .rsplit_once(WORD_MARKER)
            .map(|(base, _)| base)
            .unwrap_or(content);

        Self {
            template: format!("{base}{WORD_MARKER} {WORD_PLACEHOLDER}"),
        }
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        tracing::debug!("Loading prompt template from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_content(&content))
    }

    /// Substitute the word into the template
    pub fn render(&self, word: &str) -> String {
        self.template.replace(WORD_PLACEHOLDER, word)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}
