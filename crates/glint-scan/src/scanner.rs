//! The single-pass line scanner.
//!
//! The scanner walks a line once, left to right, with an explicit state:
//!
//! - `Normal`: between tokens.
//! - `Word { start }`: accumulating word characters since byte `start`.
//! - `Str { start, quote }`: inside a string literal opened by `quote`.
//!
//! Instead of copying characters into a token buffer, a pending token is the
//! byte range `start..i` of the input, and every emitted span is a slice of
//! the line. Round-tripping is therefore structural: spans are pushed in
//! order, each starting where the previous one ended.
//!
//! Deliberately lenient:
//!
//! - no escape sequences (`"a\"b"` closes at the second quote);
//! - an unterminated string runs to end of line and is still a string;
//! - the other quote character inside a string is plain content.

use crate::category::{Category, Span};
use crate::lexicon::Lexicon;

/// Whether `ch` can be part of a word token.
///
/// ASCII letters, digits and `_`. Anything else (including non-ASCII
/// letters) ends the current word and is emitted as its own plain span.
#[inline]
#[must_use]
pub const fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[inline]
const fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Word { start: usize },
    Str { start: usize, quote: char },
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// A line scanner bound to a [`Lexicon`].
///
/// Holds no per-line state; one scanner can be shared freely (it is `Sync`)
/// and reused for any number of lines.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    lexicon: Lexicon,
}

impl Scanner {
    #[must_use]
    pub const fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    #[must_use]
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Split one line into display spans.
    ///
    /// The concatenated span texts always equal `line`. An empty or
    /// whitespace-only line yields a single plain span holding it.
    #[must_use]
    pub fn scan_line<'a>(&self, line: &'a str) -> Vec<Span<'a>> {
        if line.trim().is_empty() {
            return vec![Span::plain(line)];
        }

        let mut spans = Vec::new();
        let mut state = State::Normal;

        for (i, ch) in line.char_indices() {
            let next = i + ch.len_utf8();

            if let State::Str { start, quote } = state {
                if ch == quote {
                    spans.push(Span::new(&line[start..next], Category::StringLiteral));
                    state = State::Normal;
                }
                continue;
            }

            // Outside a string: a non-word character ends any pending word.
            if !is_word_char(ch) {
                if let State::Word { start } = state {
                    self.push_word(&mut spans, &line[start..i]);
                    state = State::Normal;
                }
            }

            match ch {
                '#' => {
                    spans.push(Span::new(&line[i..], Category::Comment));
                    return spans;
                }
                c if is_quote(c) => state = State::Str { start: i, quote: c },
                c if is_word_char(c) => {
                    if state == State::Normal {
                        state = State::Word { start: i };
                    }
                }
                _ => spans.push(Span::plain(&line[i..next])),
            }
        }

        match state {
            State::Normal => {}
            State::Word { start } => self.push_word(&mut spans, &line[start..]),
            State::Str { start, .. } => {
                spans.push(Span::new(&line[start..], Category::StringLiteral));
            }
        }

        spans
    }

    /// Scan a multi-line sample, one span list per `\n`-separated line.
    ///
    /// A trailing `\r` stays in the line's last span. An empty input is one
    /// blank line, like an empty code block on the page.
    #[must_use]
    pub fn scan_text<'a>(&self, text: &'a str) -> Vec<Vec<Span<'a>>> {
        text.split('\n').map(|line| self.scan_line(line)).collect()
    }

    fn push_word<'a>(&self, spans: &mut Vec<Span<'a>>, word: &'a str) {
        if !word.is_empty() {
            spans.push(Span::new(word, self.lexicon.classify(word)));
        }
    }
}

/// Scan one line with the default Python lexicon.
#[must_use]
pub fn scan_line(line: &str) -> Vec<Span<'_>> {
    thread_local! {
        static DEFAULT: Scanner = Scanner::default();
    }
    DEFAULT.with(|scanner| scanner.scan_line(line))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
