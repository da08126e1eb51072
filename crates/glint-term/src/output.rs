// SPDX-License-Identifier: MIT
//
// Output buffering and stateful styled-run rendering.
//
//   OutputBuffer: accumulates the whole rendered block in memory so it
//   reaches the terminal in a single write() instead of one per span.
//
//   StyleWriter: remembers the SGR state it last emitted and only writes
//   the escapes that change something. A code line is mostly short spans
//   (one per punctuation character) in the same plain color, so most spans
//   cost zero escape bytes.

use std::io::{self, Write};

use crate::ansi;
use crate::color::{CellColor, ColorDepth};
use crate::style::{Attr, Style};

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates output for a single `write()`.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 8_192;

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Lossy UTF-8 view of the accumulated bytes.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    /// Append raw text with no styling.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to stdout and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)
    }

    /// Write accumulated output to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Real flushing happens in flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── StyleWriter ─────────────────────────────────────────────────────────────

/// Writes styled runs of text, skipping redundant escape sequences.
///
/// - **Attributes**: removing any attribute needs SGR 0, which also clears
///   colors, so tracked colors are invalidated. Adding attributes emits only
///   the new ones.
/// - **Colors**: skipped if unchanged since the last emit.
/// - **Lines**: the style is reset before every newline so a colored
///   background never bleeds into the next row or the shell prompt.
/// - **Depth**: colors are downsampled to the terminal's [`ColorDepth`];
///   with [`ColorDepth::None`] no escape is ever written.
#[allow(clippy::struct_field_names)] // The `last_` prefix is the grouping.
pub struct StyleWriter {
    depth: ColorDepth,
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
    last_attrs: Attr,
    dirty: bool,
}

impl StyleWriter {
    #[must_use]
    pub const fn new(depth: ColorDepth) -> Self {
        Self {
            depth,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::empty(),
            dirty: false,
        }
    }

    #[must_use]
    pub const fn depth(&self) -> ColorDepth {
        self.depth
    }

    /// Write `text` in `style`.
    pub fn write(&mut self, out: &mut OutputBuffer, style: Style, text: &str) {
        if text.is_empty() {
            return;
        }
        self.apply(out, style);
        out.push_str(text);
    }

    /// Write `count` spaces in `style` (padding, background fill).
    pub fn pad(&mut self, out: &mut OutputBuffer, style: Style, count: usize) {
        if count == 0 {
            return;
        }
        self.apply(out, style);
        out.buf.resize(out.buf.len() + count, b' ');
    }

    /// Reset styling and end the line.
    pub fn newline(&mut self, out: &mut OutputBuffer) {
        self.finish(out);
        out.buf.push(b'\n');
    }

    /// Reset styling if anything is still active.
    pub fn finish(&mut self, out: &mut OutputBuffer) {
        if self.dirty {
            ansi::reset(out).ok();
        }
        self.forget();
    }

    const fn forget(&mut self) {
        self.last_fg = None;
        self.last_bg = None;
        self.last_attrs = Attr::empty();
        self.dirty = false;
    }

    fn apply(&mut self, out: &mut OutputBuffer, style: Style) {
        if self.depth == ColorDepth::None {
            return;
        }
        let fg = style.fg.downsample(self.depth);
        let bg = style.bg.downsample(self.depth);

        if style.attrs != self.last_attrs {
            if !style.attrs.contains(self.last_attrs) {
                // SGR 0 clears everything, so invalidate all tracking.
                ansi::reset(out).ok();
                self.forget();
            }
            let added = style.attrs - self.last_attrs;
            if !added.is_empty() {
                ansi::attrs(out, added).ok();
                self.dirty = true;
            }
            self.last_attrs = style.attrs;
        }

        // Nothing emitted yet and nothing to emit: stay escape-free.
        if self.last_fg.is_none() && fg.is_default() {
            self.last_fg = Some(fg);
        }
        if self.last_bg.is_none() && bg.is_default() {
            self.last_bg = Some(bg);
        }

        if self.last_fg != Some(fg) {
            ansi::fg(out, fg).ok();
            self.last_fg = Some(fg);
            self.dirty = true;
        }
        if self.last_bg != Some(bg) {
            ansi::bg(out, bg).ok();
            self.last_bg = Some(bg);
            self.dirty = true;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PINK: CellColor = CellColor::Rgb(244, 114, 182);
    const GRAY: CellColor = CellColor::Rgb(209, 213, 219);

    #[test]
    fn output_buffer_write_trait() {
        let mut buf = OutputBuffer::new();
        write!(buf, "hello {}", 42).unwrap();
        assert_eq!(buf.as_bytes(), b"hello 42");
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn flush_to_drains() {
        let mut buf = OutputBuffer::new();
        buf.push_str("abc");
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"abc");
        assert!(buf.is_empty());
    }

    #[test]
    fn same_style_emits_once() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::TrueColor);
        w.write(&mut out, Style::fg(PINK), "def");
        w.write(&mut out, Style::fg(PINK), " ");
        w.write(&mut out, Style::fg(PINK), "go");
        w.finish(&mut out);
        assert_eq!(out.to_string_lossy(), "\x1b[38;2;244;114;182mdef go\x1b[0m");
    }

    #[test]
    fn color_change_emits_only_fg() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::TrueColor);
        w.write(&mut out, Style::fg(PINK), "a");
        w.write(&mut out, Style::fg(GRAY), "b");
        assert_eq!(
            out.to_string_lossy(),
            "\x1b[38;2;244;114;182ma\x1b[38;2;209;213;219mb"
        );
    }

    #[test]
    fn plain_text_has_no_escapes() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::TrueColor);
        w.write(&mut out, Style::PLAIN, "x = 1");
        w.newline(&mut out);
        assert_eq!(out.to_string_lossy(), "x = 1\n");
    }

    #[test]
    fn removing_attrs_resets_and_reapplies_color() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::TrueColor);
        w.write(&mut out, Style::fg(PINK).with_attrs(Attr::BOLD), "T");
        w.write(&mut out, Style::fg(PINK), "t");
        assert_eq!(
            out.to_string_lossy(),
            "\x1b[1m\x1b[38;2;244;114;182mT\x1b[0m\x1b[38;2;244;114;182mt"
        );
    }

    #[test]
    fn adding_attrs_keeps_color() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::TrueColor);
        w.write(&mut out, Style::fg(PINK), "a");
        w.write(&mut out, Style::fg(PINK).with_attrs(Attr::ITALIC), "b");
        assert_eq!(out.to_string_lossy(), "\x1b[38;2;244;114;182ma\x1b[3mb");
    }

    #[test]
    fn newline_resets_background() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::TrueColor);
        let style = Style::PLAIN.with_bg(CellColor::Rgb(3, 7, 18));
        w.pad(&mut out, style, 2);
        w.newline(&mut out);
        w.pad(&mut out, style, 1);
        assert_eq!(
            out.to_string_lossy(),
            "\x1b[48;2;3;7;18m  \x1b[0m\n\x1b[48;2;3;7;18m "
        );
    }

    #[test]
    fn no_color_depth_writes_text_only() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::None);
        w.write(&mut out, Style::fg(PINK).with_attrs(Attr::BOLD), "class");
        w.pad(&mut out, Style::fg(GRAY), 1);
        w.write(&mut out, Style::fg(GRAY), "Foo");
        w.newline(&mut out);
        assert_eq!(out.to_string_lossy(), "class Foo\n");
    }

    #[test]
    fn downsampled_to_palette() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::Ansi256);
        w.write(&mut out, Style::fg(CellColor::Rgb(255, 0, 0)), "r");
        // Pure red is exact in the palette (index 9 or 196).
        let s = out.to_string_lossy();
        assert!(s == "\x1b[91mr" || s == "\x1b[38;5;196mr", "got {s:?}");
    }

    #[test]
    fn empty_writes_are_skipped() {
        let mut out = OutputBuffer::new();
        let mut w = StyleWriter::new(ColorDepth::TrueColor);
        w.write(&mut out, Style::fg(PINK), "");
        w.pad(&mut out, Style::fg(PINK), 0);
        w.finish(&mut out);
        assert!(out.is_empty());
    }
}
