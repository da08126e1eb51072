//! Display categories and the spans that carry them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// What a run of characters looks like, for coloring purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    /// Identifiers, punctuation, whitespace, numbers.
    #[serde(rename = "plain")]
    Plain,
    /// Reserved words (`def`, `return`, `True`, ...).
    #[serde(rename = "keyword")]
    Keyword,
    /// Well-known names (`print`, `len`, `client`, ...).
    #[serde(rename = "builtin")]
    Builtin,
    /// Capitalized identifiers, treated as class names.
    #[serde(rename = "class")]
    ClassName,
    /// Quoted text including both quotes.
    #[serde(rename = "string")]
    StringLiteral,
    /// `#` to end of line.
    #[serde(rename = "comment")]
    Comment,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Plain,
        Self::Keyword,
        Self::Builtin,
        Self::ClassName,
        Self::StringLiteral,
        Self::Comment,
    ];

    /// Stable lowercase name used in config keys and JSON output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Keyword => "keyword",
            Self::Builtin => "builtin",
            Self::ClassName => "class",
            Self::StringLiteral => "string",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a category name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}` (expected one of: plain, keyword, builtin, class, string, comment)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// A contiguous slice of a scanned line tagged with one category.
///
/// Spans borrow from the line they were produced from, so concatenating the
/// `text` of a line's spans reproduces the line byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span<'a> {
    pub text: &'a str,
    pub category: Category,
}

impl<'a> Span<'a> {
    #[inline]
    #[must_use]
    pub const fn new(text: &'a str, category: Category) -> Self {
        Self { text, category }
    }

    #[inline]
    #[must_use]
    pub const fn plain(text: &'a str) -> Self {
        Self::new(text, Category::Plain)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
