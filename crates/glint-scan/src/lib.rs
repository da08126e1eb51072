//! # glint-scan: token scanner for documentation code samples
//!
//! Splits one line of Python-like source into colored display spans. This is
//! not a lexer in the compiler sense: it recognizes just enough of the
//! lexical surface (keywords, well-known names, capitalized identifiers,
//! string literals, `#` comments) to make code samples look right.
//!
//! # Architecture
//!
//! ```text
//! line: &str
//!     │
//!     ▼
//! scanner.rs:  single pass, explicit state {Normal, Word, Str(quote)}
//!     │  flushes words through
//!     ▼
//! lexicon.rs:  keyword set → builtin set → class-name pattern → plain
//!     │
//!     ▼
//! Vec<Span<'_>>  (borrowed slices of the input, concatenate back to it)
//! ```
//!
//! Scanning never fails. Every line is scanned independently, so callers
//! may scan lines in any order or in parallel.

pub mod category;
pub mod lexicon;
pub mod scanner;

pub use category::{Category, Span, UnknownCategory};
pub use lexicon::{Lexicon, LexiconError};
pub use scanner::{Scanner, scan_line};
