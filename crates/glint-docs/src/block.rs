//! A single titled code sample.

use serde::Deserialize;

/// Language shown on the badge when a block doesn't name one.
pub const DEFAULT_LANGUAGE: &str = "python";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// One code card: a title bar, an optional description, and the code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeBlock {
    pub title: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
}

impl CodeBlock {
    /// A block in the default language with no description.
    #[must_use]
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            language: default_language(),
            description: None,
            code: code.into(),
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the description; an empty string clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    /// The code split into display lines.
    ///
    /// Splits on `\n` exactly, so a trailing newline yields a final empty
    /// line and `\r` stays with the line it ends.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.code.split('\n')
    }

    /// Number of display lines (at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}
