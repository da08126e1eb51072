// SPDX-License-Identifier: MIT
//
// SGR escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit; that's the `StyleWriter`'s job.
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to `OutputBuffer` (backed by a Vec).

use std::io::{self, Write};

use crate::color::CellColor;
use crate::style::Attr;

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground color.
///
/// Compact codes for the 16 standard colors (30–37, 90–97), the extended
/// 256-color form for 16–255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) if idx < 8 => write!(w, "\x1b[{}m", 30 + u16::from(idx)),
        CellColor::Ansi256(idx) if idx < 16 => write!(w, "\x1b[{}m", 82 + u16::from(idx)),
        CellColor::Ansi256(idx) => write!(w, "\x1b[38;5;{idx}m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color (40–47, 100–107, 48;5;N, 48;2;R;G;B).
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Ansi256(idx) if idx < 8 => write!(w, "\x1b[{}m", 40 + u16::from(idx)),
        CellColor::Ansi256(idx) if idx < 16 => write!(w, "\x1b[{}m", 92 + u16::from(idx)),
        CellColor::Ansi256(idx) => write!(w, "\x1b[48;5;{idx}m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

const ATTR_CODES: [(Attr, &str); 5] = [
    (Attr::BOLD, "1"),
    (Attr::DIM, "2"),
    (Attr::ITALIC, "3"),
    (Attr::UNDERLINE, "4"),
    (Attr::INVERSE, "7"),
];

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// `\x1b[1;3m` for bold + italic. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = ATTR_CODES
        .iter()
        .filter(|(flag, _)| attr.contains(*flag))
        .map(|&(_, code)| code)
        .collect();
    write!(w, "\x1b[{}m", codes.join(";"))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
