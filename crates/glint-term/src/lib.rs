// SPDX-License-Identifier: MIT
//
// glint-term: terminal output for glint.
//
// glint prints highlighted code blocks to a terminal (or a pipe), not a
// full-screen UI. This crate is the byte-level half of that: colors, SGR
// escape encoding, and a buffered writer that tracks the current style so
// adjacent runs with the same colors share one escape sequence.
//
// Layers, bottom up:
//
//   color    → Color (sRGB), CellColor (what a terminal understands)
//   style    → Attr bitflags + Style (fg, bg, attrs)
//   ansi     → pure SGR writers to any `impl Write`
//   output   → OutputBuffer (one write per render) + StyleWriter
//   terminal → tty detection and window size

pub mod ansi;
pub mod color;
pub mod output;
pub mod style;
pub mod terminal;

pub use color::{CellColor, Color, ColorDepth, ColorParseError};
pub use output::{OutputBuffer, StyleWriter};
pub use style::{Attr, Style};
