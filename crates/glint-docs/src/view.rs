//! BlockView: draws one [`CodeBlock`] as a highlighted terminal block.
//!
//! Layout with the frame on (`width` columns, line numbers enabled):
//!
//! ```text
//!  Quick Start Example                    python      ← header (title fill)
//!  Initialize the client                              ← description (optional)
//! ────────────────────────────────────────────────    ← separator
//!   1 from justllms import JustLLM                    ← code rows
//!   2 client = JustLLM()
//! ```
//!
//! Only the header and description are fitted to the width. Code rows are
//! never truncated or wrapped; a line longer than the block simply runs
//! past the right edge and the terminal does what it does with it.
//!
//! With the frame off only the code rows are written, with no padding, so
//! the output can be piped or pasted.

use std::borrow::Cow;

use glint_scan::{Category, Scanner};
use glint_term::terminal;
use glint_term::{ColorDepth, OutputBuffer, Style, StyleWriter};
use glint_theme::Theme;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::block::CodeBlock;
use crate::catalog::Section;

/// Narrowest block picked automatically from the terminal size.
pub const MIN_AUTO_WIDTH: usize = 40;
/// Widest block picked automatically from the terminal size.
pub const MAX_AUTO_WIDTH: usize = 120;
/// Width used when there is no terminal to ask.
pub const FALLBACK_WIDTH: usize = 80;
/// Explicit widths below this are raised to it.
pub const MIN_WIDTH: usize = 20;

const SEPARATOR: &str = "─";
const ELLIPSIS: char = '…';

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How blocks are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Block width in columns; `None` = terminal width, clamped.
    pub width: Option<usize>,
    /// Show a right-aligned line number gutter.
    pub line_numbers: bool,
    /// Draw the header, description and separator.
    pub frame: bool,
    /// Tab stop interval for code rows.
    pub tab_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: None,
            line_numbers: false,
            frame: true,
            tab_width: 4,
        }
    }
}

impl RenderOptions {
    /// The block width for a terminal `cols` wide (`None` if unknown).
    #[must_use]
    pub fn resolve_width(&self, cols: Option<u16>) -> usize {
        match self.width {
            Some(width) => width.max(MIN_WIDTH),
            None => cols
                .map_or(FALLBACK_WIDTH, usize::from)
                .clamp(MIN_AUTO_WIDTH, MAX_AUTO_WIDTH),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Digits needed for the largest line number.
#[must_use]
pub fn gutter_digits(line_count: usize) -> usize {
    // At least 1, so ilog10 doesn't panic on 0.
    line_count.max(1).ilog10() as usize + 1
}

/// Fit `text` into `max` display columns, cutting on grapheme boundaries
/// and ending with `…` when anything was cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> Cow<'_, str> {
    if text.width() <= max {
        return Cow::Borrowed(text);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }

    let budget = max - 1; // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

// ---------------------------------------------------------------------------
// BlockView
// ---------------------------------------------------------------------------

/// Renders code blocks with one scanner and theme.
///
/// Holds the [`StyleWriter`] between rows so consecutive blocks share its
/// escape tracking. Every row ends with a reset, so the output can be
/// flushed after any block.
pub struct BlockView<'a> {
    scanner: &'a Scanner,
    theme: &'a Theme,
    options: RenderOptions,
    width: usize,
    writer: StyleWriter,
}

impl<'a> BlockView<'a> {
    /// A view sized from the current terminal (see [`RenderOptions::width`]).
    #[must_use]
    pub fn new(
        scanner: &'a Scanner,
        theme: &'a Theme,
        depth: ColorDepth,
        options: RenderOptions,
    ) -> Self {
        let cols = terminal::get_size().map(|size| size.cols);
        let width = options.resolve_width(cols);
        tracing::debug!(width, ?depth, theme = %theme.name, "block view");
        Self {
            scanner,
            theme,
            options,
            width,
            writer: StyleWriter::new(depth),
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Whether code rows are padded out to the block width. Only worth it
    /// when there is a background color to show.
    fn fills_rows(&self) -> bool {
        self.options.frame
            && self.writer.depth() != ColorDepth::None
            && !self.theme.background.is_default()
    }

    /// Render one block: header, description, separator, code rows.
    pub fn render(&mut self, out: &mut OutputBuffer, block: &CodeBlock) {
        if self.options.frame {
            self.header(out, block);
            if let Some(description) = &block.description {
                self.description(out, description);
            }
            self.separator(out);
        }

        let rows = block.line_count();
        let digits = gutter_digits(rows);
        for (idx, line) in block.lines().enumerate() {
            self.code_row(out, idx + 1, digits, line);
        }
        tracing::trace!(title = %block.title, rows, "rendered block");
    }

    /// A section title line, for listing several blocks under it.
    pub fn heading(&mut self, out: &mut OutputBuffer, section: &Section) {
        let style = Style::fg(self.theme.title.fg).with_attrs(self.theme.title.attrs);
        let title = truncate(&section.title, self.width);
        self.writer.write(out, style, &title);
        self.writer.newline(out);
    }

    fn header(&mut self, out: &mut OutputBuffer, block: &CodeBlock) {
        let bar = self.theme.title.style();
        let badge_style = self.theme.badge.over(self.theme.title.bg);

        let badge = format!(" {} ", truncate(&block.language, self.width / 3));
        let badge_w = badge.width();
        // One column of padding on each side plus a gap before the badge.
        let title = truncate(&block.title, self.width.saturating_sub(badge_w + 3));
        let fill = self.width.saturating_sub(title.width() + badge_w + 2);

        self.writer.pad(out, bar, 1);
        self.writer.write(out, bar, &title);
        self.writer.pad(out, bar, fill);
        self.writer.write(out, badge_style, &badge);
        self.writer.pad(out, bar, 1);
        self.writer.newline(out);
    }

    fn description(&mut self, out: &mut OutputBuffer, description: &str) {
        let style = self.theme.description.over(self.theme.title.bg);
        let text = truncate(description, self.width.saturating_sub(2));
        let fill = self.width.saturating_sub(text.width() + 1);

        self.writer.pad(out, style, 1);
        self.writer.write(out, style, &text);
        self.writer.pad(out, style, fill);
        self.writer.newline(out);
    }

    fn separator(&mut self, out: &mut OutputBuffer) {
        let style = self.theme.frame.over(self.theme.background);
        self.writer.write(out, style, &SEPARATOR.repeat(self.width));
        self.writer.newline(out);
    }

    fn code_row(&mut self, out: &mut OutputBuffer, number: usize, digits: usize, line: &str) {
        let fill = self.theme.code_style(Category::Plain);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut used = 0;

        if self.options.frame {
            self.writer.pad(out, fill, 1);
            used += 1;
        }
        if self.options.line_numbers {
            let gutter = self.theme.line_nr.over(self.theme.background);
            self.writer.write(out, gutter, &format!("{number:>digits$}"));
            self.writer.pad(out, fill, 1);
            used += digits + 1;
        }

        let mut col = 0;
        for span in self.scanner.scan_line(line) {
            let style = self.theme.code_style(span.category);
            col = self.write_expanded(out, style, span.text, col);
        }
        used += col;

        if self.fills_rows() {
            self.writer.pad(out, fill, self.width.saturating_sub(used));
        }
        self.writer.newline(out);
    }

    /// Write `text` with tabs expanded to the next tab stop. `col` is the
    /// display column within the code; returns the column after `text`.
    fn write_expanded(
        &mut self,
        out: &mut OutputBuffer,
        style: Style,
        text: &str,
        mut col: usize,
    ) -> usize {
        let tab = self.options.tab_width.max(1);
        for (i, piece) in text.split('\t').enumerate() {
            if i > 0 {
                let stop = tab - col % tab;
                self.writer.pad(out, style, stop);
                col += stop;
            }
            self.writer.write(out, style, piece);
            col += piece.width();
        }
        col
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
