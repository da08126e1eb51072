//! Word classification tables.
//!
//! The builtin list mixes real Python builtins with names that appear in the
//! documentation samples (`client`, `response`). It is tuned to make those
//! samples look right, so it lives here as data that configuration can
//! extend or replace rather than as logic in the scanner.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::category::Category;
use crate::scanner::is_word_char;

/// Reserved words colored as keywords.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "from", "import", "def", "class", "if", "else", "elif", "try", "except", "for", "while",
    "with", "as", "return", "yield", "lambda", "and", "or", "not", "in", "is", "True", "False",
    "None",
];

/// Names colored as builtins.
pub const PYTHON_BUILTINS: &[&str] = &[
    "print", "len", "str", "int", "float", "list", "dict", "set", "tuple", "range", "client",
    "response",
];

/// Capitalized identifier: uppercase ASCII letter, then ASCII word characters.
pub const CLASS_PATTERN: &str = "[A-Z][a-zA-Z0-9_]*";

static DEFAULT_CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| anchored(CLASS_PATTERN).expect("CLASS_PATTERN compiles"));

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("invalid class-name pattern `{pattern}`")]
    ClassPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A listed word contains a character the scanner never puts in a
    /// token, so it could never match.
    #[error("{set} entry `{word}` is not a single word (letters, digits, `_`)")]
    NotAWord { set: &'static str, word: String },
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

/// Keyword set, builtin set and class-name pattern.
#[derive(Debug, Clone)]
pub struct Lexicon {
    keywords: HashSet<String>,
    builtins: HashSet<String>,
    class_pattern: Regex,
}

impl Lexicon {
    /// The Python-flavored lexicon the documentation samples are written in.
    #[must_use]
    pub fn python() -> Self {
        Self {
            keywords: PYTHON_KEYWORDS.iter().map(|&w| w.to_owned()).collect(),
            builtins: PYTHON_BUILTINS.iter().map(|&w| w.to_owned()).collect(),
            class_pattern: DEFAULT_CLASS_REGEX.clone(),
        }
    }

    /// A lexicon with no keywords or builtins and the default class pattern.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keywords: HashSet::new(),
            builtins: HashSet::new(),
            ..Self::python()
        }
    }

    /// Add words to the keyword set.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::NotAWord`] if a word is empty or contains a
    /// non-word character.
    pub fn with_keywords<I, S>(mut self, words: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        insert_words(&mut self.keywords, "keyword", words)?;
        Ok(self)
    }

    /// Add words to the builtin set.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::NotAWord`] if a word is empty or contains a
    /// non-word character.
    pub fn with_builtins<I, S>(mut self, words: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        insert_words(&mut self.builtins, "builtin", words)?;
        Ok(self)
    }

    /// Replace the class-name pattern.
    ///
    /// The pattern must match the whole word; it is anchored automatically.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::ClassPattern`] if the regex does not compile.
    pub fn with_class_pattern(mut self, pattern: &str) -> Result<Self, LexiconError> {
        self.class_pattern = anchored(pattern).map_err(|source| LexiconError::ClassPattern {
            pattern: pattern.to_owned(),
            source: Box::new(source),
        })?;
        Ok(self)
    }

    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    #[must_use]
    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(word)
    }

    #[must_use]
    pub fn is_class_name(&self, word: &str) -> bool {
        self.class_pattern.is_match(word)
    }

    /// Classify a flushed word. Keyword wins over builtin, builtin over class
    /// name; anything else is plain.
    #[must_use]
    pub fn classify(&self, word: &str) -> Category {
        if self.is_keyword(word) {
            Category::Keyword
        } else if self.is_builtin(word) {
            Category::Builtin
        } else if self.is_class_name(word) {
            Category::ClassName
        } else {
            Category::Plain
        }
    }

    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn builtin_count(&self) -> usize {
        self.builtins.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::python()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

fn insert_words<I, S>(
    set: &mut HashSet<String>,
    name: &'static str,
    words: I,
) -> Result<(), LexiconError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for word in words {
        let word = word.into();
        if word.is_empty() || !word.chars().all(is_word_char) {
            return Err(LexiconError::NotAWord { set: name, word });
        }
        set.insert(word);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_beats_class_pattern() {
        let lex = Lexicon::python();
        // `True` is capitalized but reserved.
        assert_eq!(lex.classify("True"), Category::Keyword);
        assert_eq!(lex.classify("None"), Category::Keyword);
    }

    #[test]
    fn builtins_and_sample_names() {
        let lex = Lexicon::python();
        assert_eq!(lex.classify("print"), Category::Builtin);
        assert_eq!(lex.classify("client"), Category::Builtin);
        assert_eq!(lex.classify("response"), Category::Builtin);
    }

    #[test]
    fn class_names() {
        let lex = Lexicon::python();
        assert_eq!(lex.classify("JustLLM"), Category::ClassName);
        assert_eq!(lex.classify("A"), Category::ClassName);
        assert_eq!(lex.classify("X_2"), Category::ClassName);
        assert_eq!(lex.classify("_Private"), Category::Plain);
        assert_eq!(lex.classify("lower"), Category::Plain);
        assert_eq!(lex.classify("42"), Category::Plain);
    }

    #[test]
    fn classification_is_case_sensitive() {
        let lex = Lexicon::python();
        assert_eq!(lex.classify("Print"), Category::ClassName);
        assert_eq!(lex.classify("true"), Category::Plain);
    }

    #[test]
    fn extend_sets() {
        let lex = Lexicon::python()
            .with_keywords(["async", "await"])
            .unwrap()
            .with_builtins(["session"])
            .unwrap();
        assert_eq!(lex.classify("await"), Category::Keyword);
        assert_eq!(lex.classify("session"), Category::Builtin);
        assert_eq!(lex.keyword_count(), PYTHON_KEYWORDS.len() + 2);
    }

    #[test]
    fn keyword_wins_over_builtin_when_in_both() {
        let lex = Lexicon::empty()
            .with_keywords(["print"])
            .unwrap()
            .with_builtins(["print"])
            .unwrap();
        assert_eq!(lex.classify("print"), Category::Keyword);
    }

    #[test]
    fn empty_lexicon_keeps_class_pattern() {
        let lex = Lexicon::empty();
        assert_eq!(lex.classify("def"), Category::Plain);
        assert_eq!(lex.classify("Foo"), Category::ClassName);
    }

    #[test]
    fn rejects_non_words() {
        let err = Lexicon::python().with_keywords(["not-a-word"]).unwrap_err();
        assert!(matches!(err, LexiconError::NotAWord { set: "keyword", .. }));
        let err = Lexicon::python().with_builtins([""]).unwrap_err();
        assert!(matches!(err, LexiconError::NotAWord { set: "builtin", .. }));
    }

    #[test]
    fn class_pattern_is_anchored() {
        let lex = Lexicon::python().with_class_pattern("[A-Z]+").unwrap();
        assert_eq!(lex.classify("HTTP"), Category::ClassName);
        // Partial match is not enough.
        assert_eq!(lex.classify("HTTPClient"), Category::Plain);
    }

    #[test]
    fn bad_class_pattern() {
        let err = Lexicon::python().with_class_pattern("[A-Z").unwrap_err();
        assert!(matches!(err, LexiconError::ClassPattern { .. }));
        assert!(err.to_string().contains("[A-Z"));
    }
}
